use crate::utils::error::Result;
use std::path::PathBuf;

/// 匯出檔的讀寫後端。`path` 皆為相對於資料目錄的檔名。
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
    /// 供日誌與回報使用的完整位置
    fn location(&self, path: &str) -> PathBuf;
}

pub trait PersistenceConfig {
    fn data_dir(&self) -> &str;
    fn pets_file(&self) -> &str;
    fn visits_export_file(&self) -> &str;
    /// 匯入讀取的就診文件，預設與匯出相同
    fn visits_import_file(&self) -> &str {
        self.visits_export_file()
    }
}
