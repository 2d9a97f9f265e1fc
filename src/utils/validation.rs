use crate::utils::error::{ClinicError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名只能是資料目錄下的單一檔案
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }

    if name == "." || name == ".." {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must name a file".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, name: &str, expected: &str) -> Result<()> {
    match std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(()),
        Some(ext) => Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("Unsupported file extension: {}. Expected: {}", ext, expected),
        }),
        None => Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}
