use crate::domain::ports::Storage;
use crate::utils::error::{ClinicError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 以資料目錄為根的本機檔案存儲
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.location(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.location(path);
        let parent = full_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // 先寫到同目錄的暫存檔再改名，讀者不會看到寫一半的檔案
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(data)?;
        tmp.persist(&full_path).map_err(|e| ClinicError::IoError(e.error))?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.location(path).is_file()
    }

    fn location(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

/// 記憶體存儲，可指定某些檔名寫入失敗
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<String, Vec<u8>>>,
    failing_writes: Vec<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, path: impl Into<String>) -> Self {
        self.failing_writes.push(path.into());
        self
    }

    pub fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), data.into());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.get(path).ok_or_else(|| {
            ClinicError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path),
            ))
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.failing_writes.iter().any(|p| p == path) {
            return Err(ClinicError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("write to {} refused", path),
            )));
        }
        self.insert(path, data);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn location(&self, path: &str) -> PathBuf {
        PathBuf::from("memory").join(path)
    }
}
