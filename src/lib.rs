pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{LocalStorage, MemoryStorage};
pub use app::Menu;
pub use config::{toml_config::TomlConfig, ClinicSettings};
pub use crate::core::{clinic::Clinic, ExportOutcome, ImportOutcome};
pub use domain::{
    model::{Owner, Pet, VisitRecord},
    registry::Registry,
};
pub use utils::error::{ClinicError, Result};
