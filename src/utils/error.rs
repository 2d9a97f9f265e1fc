use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Pet not found: {name}")]
    NotFound { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ClinicError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ClinicError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        ClinicError::NotFound { name: name.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ClinicError::ParseError {
            message: message.into(),
        }
    }

    /// 檔案層級的 I/O 失敗 (包含 CSV 讀寫時的底層 I/O 錯誤)
    pub fn is_io(&self) -> bool {
        match self {
            ClinicError::IoError(_) => true,
            ClinicError::CsvError(e) => e.is_io_error(),
            _ => false,
        }
    }

    /// 給使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClinicError::InvalidArgument { message } => message.clone(),
            ClinicError::NotFound { name } => format!("Pet '{}' was not found.", name),
            ClinicError::IoError(_) => "Could not read or write the data files.".to_string(),
            ClinicError::CsvError(_) | ClinicError::ParseError { .. } => {
                "The pet table could not be processed.".to_string()
            }
            ClinicError::SerializationError(_) => {
                "The visit document could not be processed.".to_string()
            }
            ClinicError::ConfigError { .. } | ClinicError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClinicError::InvalidArgument { .. } => "Check the values entered and try again",
            ClinicError::NotFound { .. } => "List the registered pets to check the exact name",
            ClinicError::IoError(_) => "Check that the data directory exists and is writable",
            ClinicError::CsvError(_) | ClinicError::ParseError { .. } => {
                "Inspect the CSV export for damaged rows"
            }
            ClinicError::SerializationError(_) => "Inspect the JSON export for syntax errors",
            ClinicError::ConfigError { .. } | ClinicError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClinicError>;
