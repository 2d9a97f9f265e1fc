use crate::core::codec;
use crate::domain::ports::{PersistenceConfig, Storage};
use crate::domain::registry::Registry;
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub pets_path: PathBuf,
    pub visits_path: PathBuf,
    pub pets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Success(ExportSummary),
    Failure { reason: String },
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Success(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub pets: usize,
    pub skipped_rows: usize,
    pub visit_blocks_applied: usize,
    pub visit_blocks_dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Loaded(ImportSummary),
    /// 任一匯出檔不存在；不算錯誤
    NoPriorData,
    Failure { reason: String },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ImportOutcome::Failure { .. })
    }
}

/// 在 [`Storage`] 上進行整批匯出 / 匯入
pub struct Persistence<S: Storage, C: PersistenceConfig> {
    storage: S,
    config: C,
}

impl<S: Storage, C: PersistenceConfig> Persistence<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 寫出寵物表與就診文件。兩個檔案各自原子寫入，但彼此之間沒有交易保證：
    /// 就診文件寫入失敗時，寵物表已經更新。
    pub fn export(&self, registry: &Registry) -> ExportOutcome {
        match self.try_export(registry) {
            Ok(summary) => {
                tracing::info!(
                    "Data exported: {} pets to {} and {}",
                    summary.pets,
                    summary.pets_path.display(),
                    summary.visits_path.display()
                );
                ExportOutcome::Success(summary)
            }
            Err(e) => {
                tracing::error!("Failed to export data: {}", e);
                ExportOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_export(&self, registry: &Registry) -> Result<ExportSummary> {
        let pets_file = self.config.pets_file();
        let visits_file = self.config.visits_export_file();

        let csv = codec::encode_pets_csv(registry)?;
        self.storage.write_file(pets_file, &csv)?;
        tracing::debug!("Wrote {} bytes to {}", csv.len(), pets_file);

        let json = codec::encode_visits_json(registry)?;
        self.storage.write_file(visits_file, &json)?;
        tracing::debug!("Wrote {} bytes to {}", json.len(), visits_file);

        Ok(ExportSummary {
            pets_path: self.storage.location(pets_file),
            visits_path: self.storage.location(visits_file),
            pets: registry.len(),
        })
    }

    /// 以匯入資料取代 `registry`。檔案缺少或匯入失敗時 `registry` 保持原狀。
    pub fn import_into(&self, registry: &mut Registry) -> ImportOutcome {
        let pets_file = self.config.pets_file();
        let visits_file = self.config.visits_import_file();

        if !self.storage.exists(pets_file) || !self.storage.exists(visits_file) {
            tracing::warn!(
                "Import files not found ({}, {}), no prior data",
                self.storage.location(pets_file).display(),
                self.storage.location(visits_file).display()
            );
            return ImportOutcome::NoPriorData;
        }

        match self.try_import(pets_file, visits_file) {
            Ok((loaded, summary)) => {
                *registry = loaded;
                tracing::info!(
                    "Data imported: {} pets ({} rows skipped), {} visit blocks applied, {} dropped",
                    summary.pets,
                    summary.skipped_rows,
                    summary.visit_blocks_applied,
                    summary.visit_blocks_dropped
                );
                ImportOutcome::Loaded(summary)
            }
            Err(e) => {
                tracing::error!("Failed to import data: {}", e);
                ImportOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_import(&self, pets_file: &str, visits_file: &str) -> Result<(Registry, ImportSummary)> {
        let decoded = codec::decode_pets_csv(&self.storage.read_file(pets_file)?)?;

        let mut staging = Registry::new();
        for pet in decoded.pets {
            staging.add(pet);
        }

        let blocks = codec::decode_visits_json(&self.storage.read_file(visits_file)?)?;
        let merge = codec::apply_visit_blocks(&mut staging, blocks);

        let summary = ImportSummary {
            pets: staging.len(),
            skipped_rows: decoded.skipped_rows,
            visit_blocks_applied: merge.applied,
            visit_blocks_dropped: merge.dropped,
        };
        Ok((staging, summary))
    }
}
