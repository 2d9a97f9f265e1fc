use crate::config::toml_config::TomlConfig;
use crate::config::{
    ClinicSettings, DEFAULT_DATA_DIR, DEFAULT_LOG_FILE, DEFAULT_PETS_FILE, DEFAULT_VISITS_FILE,
};
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "vet-clinic")]
#[command(about = "Record manager for a small veterinary clinic")]
pub struct CliConfig {
    /// TOML configuration file; replaces the storage and logging flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, default_value = DEFAULT_PETS_FILE)]
    pub pets_file: String,

    #[arg(long, default_value = DEFAULT_VISITS_FILE)]
    pub visits_file: String,

    /// Visit document read on import (defaults to --visits-file)
    #[arg(long)]
    pub visits_import_file: Option<String>,

    /// File the diagnostic log is appended to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    /// Write the diagnostic log to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn settings(&self) -> Result<ClinicSettings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => ClinicSettings {
                data_dir: self.data_dir.clone(),
                pets_file: self.pets_file.clone(),
                visits_export_file: self.visits_file.clone(),
                visits_import_file: self.visits_import_file.clone(),
                log_file: Some(self.log_file.clone()),
                verbose: false,
            },
        };
        settings.verbose |= self.verbose;
        if self.log_stderr {
            settings.log_file = None;
        }
        Ok(settings)
    }
}
