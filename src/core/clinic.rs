use crate::core::persistence::{ExportOutcome, ImportOutcome, Persistence};
use crate::domain::model::{Owner, Pet, VisitRecord};
use crate::domain::ports::{PersistenceConfig, Storage};
use crate::domain::registry::Registry;
use crate::utils::error::{ClinicError, Result};

/// 選單層使用的操作入口，擁有寵物登錄
pub struct Clinic<S: Storage, C: PersistenceConfig> {
    registry: Registry,
    persistence: Persistence<S, C>,
}

impl<S: Storage, C: PersistenceConfig> Clinic<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            registry: Registry::new(),
            persistence: Persistence::new(storage, config),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn persistence(&self) -> &Persistence<S, C> {
        &self.persistence
    }

    #[allow(clippy::too_many_arguments)]
    pub fn register_pet(
        &mut self,
        name: &str,
        species: &str,
        breed: &str,
        age: i64,
        owner_name: &str,
        owner_phone: &str,
        owner_address: &str,
    ) -> Result<&Pet> {
        let owner = Owner::new(owner_name, owner_phone, owner_address);
        let pet = Pet::new(name, species, breed, age, owner).map_err(|e| {
            tracing::error!("Failed to register pet '{}': {}", name, e);
            e
        })?;

        tracing::info!("Pet registered: {}, Owner: {}", name, owner_name);
        Ok(self.registry.add(pet))
    }

    pub fn register_visit(
        &mut self,
        pet_name: &str,
        date: &str,
        reason: &str,
        diagnosis: &str,
    ) -> Result<()> {
        let Some(pet) = self.registry.find_by_name_mut(pet_name) else {
            tracing::warn!("Attempt to register a visit for unknown pet: {}", pet_name);
            return Err(ClinicError::not_found(pet_name));
        };

        pet.add_visit(VisitRecord::new(date, reason, diagnosis));
        tracing::info!("Visit registered for: {}, Date: {}", pet.name(), date);
        Ok(())
    }

    pub fn find_pet(&self, name: &str) -> Result<&Pet> {
        self.registry.find_by_name(name).ok_or_else(|| {
            tracing::warn!("Lookup for unknown pet: {}", name);
            ClinicError::not_found(name)
        })
    }

    pub fn list_pets(&self) -> &[Pet] {
        self.registry.list()
    }

    pub fn get_history(&self, pet_name: &str) -> Result<String> {
        self.find_pet(pet_name)
            .map(|pet| pet.history_summary().to_string())
    }

    pub fn export_data(&self) -> ExportOutcome {
        self.persistence.export(&self.registry)
    }

    /// 先清空登錄再匯入，不會重複累加；沒有資料檔或匯入失敗時登錄保持為空
    pub fn import_data(&mut self) -> ImportOutcome {
        self.registry.clear();
        self.persistence.import_into(&mut self.registry)
    }
}
