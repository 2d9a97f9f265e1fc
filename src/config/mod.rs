#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::PersistenceConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_DIR: &str = "exports";
pub const DEFAULT_PETS_FILE: &str = "pets_owners.csv";
pub const DEFAULT_VISITS_FILE: &str = "visits.json";
pub const DEFAULT_LOG_FILE: &str = "vet_clinic.log";

/// 解析完成的執行設定，來源可以是命令列或 TOML 檔
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub data_dir: String,
    pub pets_file: String,
    pub visits_export_file: String,
    /// 未設定時匯入讀取 `visits_export_file`
    pub visits_import_file: Option<String>,
    /// `None` 表示日誌輸出到 stderr
    pub log_file: Option<String>,
    pub verbose: bool,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            pets_file: DEFAULT_PETS_FILE.to_string(),
            visits_export_file: DEFAULT_VISITS_FILE.to_string(),
            visits_import_file: None,
            log_file: Some(DEFAULT_LOG_FILE.to_string()),
            verbose: false,
        }
    }
}

impl PersistenceConfig for ClinicSettings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn pets_file(&self) -> &str {
        &self.pets_file
    }

    fn visits_export_file(&self) -> &str {
        &self.visits_export_file
    }

    fn visits_import_file(&self) -> &str {
        self.visits_import_file
            .as_deref()
            .unwrap_or(&self.visits_export_file)
    }
}

impl Validate for ClinicSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;

        validation::validate_file_name("pets_file", &self.pets_file)?;
        validation::validate_file_extension("pets_file", &self.pets_file, "csv")?;

        validation::validate_file_name("visits_export_file", &self.visits_export_file)?;
        validation::validate_file_extension("visits_export_file", &self.visits_export_file, "json")?;

        if let Some(import_file) = &self.visits_import_file {
            validation::validate_file_name("visits_import_file", import_file)?;
            validation::validate_file_extension("visits_import_file", import_file, "json")?;
        }

        if let Some(log_file) = &self.log_file {
            validation::validate_path("log_file", log_file)?;
        }

        Ok(())
    }
}
