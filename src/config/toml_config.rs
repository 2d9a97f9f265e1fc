use crate::config::ClinicSettings;
use crate::utils::error::{ClinicError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub pets_file: Option<String>,
    pub visits_export_file: Option<String>,
    pub visits_import_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    /// 為 true 時日誌寫到 stderr，忽略 `file`
    pub stderr: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClinicError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClinicError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLINIC_DATA_DIR})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClinicError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 轉成執行設定，未填的欄位使用預設值
    pub fn into_settings(self) -> ClinicSettings {
        let defaults = ClinicSettings::default();
        let storage = self.storage.unwrap_or_default();
        let logging = self.logging.unwrap_or_default();

        ClinicSettings {
            data_dir: storage.data_dir.unwrap_or(defaults.data_dir),
            pets_file: storage.pets_file.unwrap_or(defaults.pets_file),
            visits_export_file: storage
                .visits_export_file
                .unwrap_or(defaults.visits_export_file),
            visits_import_file: storage.visits_import_file,
            log_file: if logging.stderr.unwrap_or(false) {
                None
            } else {
                logging.file.or(defaults.log_file)
            },
            verbose: logging.verbose.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PersistenceConfig;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[storage]
data_dir = "./clinic-data"
pets_file = "pets.csv"
visits_export_file = "visits.json"
visits_import_file = "visit_history.json"

[logging]
file = "clinic.log"
verbose = true
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();

        assert_eq!(settings.data_dir(), "./clinic-data");
        assert_eq!(settings.pets_file(), "pets.csv");
        assert_eq!(settings.visits_import_file(), "visit_history.json");
        assert_eq!(settings.log_file.as_deref(), Some("clinic.log"));
        assert!(settings.verbose);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        assert_eq!(settings, ClinicSettings::default());
    }

    #[test]
    fn test_logging_to_stderr() {
        let toml_content = r#"
[logging]
file = "clinic.log"
stderr = true
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VET_CLINIC_TEST_DATA_DIR", "/tmp/vet-data");

        let toml_content = r#"
[storage]
data_dir = "${VET_CLINIC_TEST_DATA_DIR}"
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();
        assert_eq!(settings.data_dir, "/tmp/vet-data");

        std::env::remove_var("VET_CLINIC_TEST_DATA_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[storage\ndata_dir = 1");
        assert!(matches!(result, Err(ClinicError::ConfigError { .. })));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[storage]
pets_file = "pets.txt"
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[storage]
data_dir = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.into_settings().data_dir, "file-test");
    }
}
