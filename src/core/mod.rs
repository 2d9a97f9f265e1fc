pub mod clinic;
pub mod codec;
pub mod persistence;

pub use crate::domain::model::{HistorySummary, Owner, Pet, VisitRecord};
pub use crate::domain::ports::{PersistenceConfig, Storage};
pub use crate::domain::registry::Registry;
pub use crate::utils::error::Result;
pub use persistence::{ExportOutcome, ExportSummary, ImportOutcome, ImportSummary};
