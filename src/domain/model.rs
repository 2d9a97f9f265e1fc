use crate::utils::error::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 沒有任何就診紀錄時的提示
pub const NO_VISITS_MESSAGE: &str = "There are no consultations registered for this pet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl Owner {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Owner: {}, Phone: {}, Address: {}",
            self.name, self.phone, self.address
        )
    }
}

/// 一次就診。日期是自由文字，不做格式檢查。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub date: String,
    pub reason: String,
    pub diagnosis: String,
}

impl VisitRecord {
    pub fn new(
        date: impl Into<String>,
        reason: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            reason: reason.into(),
            diagnosis: diagnosis.into(),
        }
    }
}

impl fmt::Display for VisitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Reason: {} | Diagnosis: {}",
            self.date, self.reason, self.diagnosis
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    name: String,
    species: String,
    breed: String,
    age: u32,
    owner: Owner,
    visits: Vec<VisitRecord>,
}

impl Pet {
    /// 建立寵物；年齡為負數時回傳 `InvalidArgument`
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        breed: impl Into<String>,
        age: i64,
        owner: Owner,
    ) -> Result<Self> {
        if age < 0 {
            return Err(ClinicError::invalid_argument("Age cannot be negative."));
        }
        let age = u32::try_from(age)
            .map_err(|_| ClinicError::invalid_argument(format!("Age {} is too large.", age)))?;

        Ok(Self {
            name: name.into(),
            species: species.into(),
            breed: breed.into(),
            age,
            owner,
            visits: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    pub fn add_visit(&mut self, record: VisitRecord) {
        self.visits.push(record);
    }

    pub fn history_summary(&self) -> HistorySummary<'_> {
        HistorySummary {
            pet_name: &self.name,
            visits: &self.visits,
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {} years)\n{}",
            self.name, self.species, self.breed, self.age, self.owner
        )
    }
}

/// 寵物就診歷史的唯讀檢視，可重複迭代
#[derive(Debug, Clone, Copy)]
pub struct HistorySummary<'a> {
    pet_name: &'a str,
    visits: &'a [VisitRecord],
}

impl<'a> HistorySummary<'a> {
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn lines(&self) -> Box<dyn Iterator<Item = String> + 'a> {
        if self.visits.is_empty() {
            return Box::new(std::iter::once(NO_VISITS_MESSAGE.to_string()));
        }

        let visits = self.visits;
        let header = std::iter::once(format!("History of {}:", self.pet_name));
        Box::new(header.chain(visits.iter().map(|visit| visit.to_string())))
    }
}

impl fmt::Display for HistorySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carlos() -> Owner {
        Owner::new("Carlos", "123456789", "Calle Falsa 123")
    }

    #[test]
    fn test_owner_attributes() {
        let owner = carlos();
        assert_eq!(owner.name, "Carlos");
        assert_eq!(owner.phone, "123456789");
        assert_eq!(owner.address, "Calle Falsa 123");
        assert_eq!(
            owner.to_string(),
            "Owner: Carlos, Phone: 123456789, Address: Calle Falsa 123"
        );
    }

    #[test]
    fn test_pet_attributes() {
        let pet = Pet::new("Firulais", "Dog", "Labrador", 5, carlos()).unwrap();
        assert_eq!(pet.name(), "Firulais");
        assert_eq!(pet.breed(), "Labrador");
        assert_eq!(pet.age(), 5);
        assert_eq!(pet.owner(), &carlos());
        assert!(pet.visits().is_empty());
    }

    #[test]
    fn test_negative_age_is_rejected() {
        let err = Pet::new("Toby", "Cat", "Siamese", -3, carlos()).unwrap_err();
        assert!(matches!(err, ClinicError::InvalidArgument { .. }));
    }

    #[test]
    fn test_zero_age_is_accepted() {
        let pet = Pet::new("Newborn", "Cat", "Siamese", 0, carlos()).unwrap();
        assert_eq!(pet.age(), 0);
    }

    #[test]
    fn test_oversized_age_is_rejected() {
        let result = Pet::new("Methuselah", "Turtle", "Galapagos", i64::from(u32::MAX) + 1, carlos());
        assert!(matches!(result, Err(ClinicError::InvalidArgument { .. })));
    }

    #[test]
    fn test_visit_display() {
        let visit = VisitRecord::new("01/06/2025", "Revisión general", "Saludable");
        assert_eq!(
            visit.to_string(),
            "[01/06/2025] Reason: Revisión general | Diagnosis: Saludable"
        );
    }

    #[test]
    fn test_add_visit_keeps_order() {
        let mut pet = Pet::new("Firulais", "Dog", "Labrador", 5, carlos()).unwrap();
        pet.add_visit(VisitRecord::new("01/06/2025", "Checkup", "Healthy"));
        pet.add_visit(VisitRecord::new("02/06/2025", "Vaccine", "Done"));

        let dates: Vec<&str> = pet.visits().iter().map(|v| v.date.as_str()).collect();
        assert_eq!(dates, vec!["01/06/2025", "02/06/2025"]);
    }

    #[test]
    fn test_empty_history_uses_sentinel() {
        let pet = Pet::new("Firulais", "Dog", "Labrador", 5, carlos()).unwrap();
        let summary = pet.history_summary();

        assert!(summary.is_empty());
        let lines: Vec<String> = summary.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("no consultations registered"));
    }

    #[test]
    fn test_history_lines_are_restartable() {
        let mut pet = Pet::new("Firulais", "Dog", "Labrador", 5, carlos()).unwrap();
        pet.add_visit(VisitRecord::new("01/06/2025", "Revisión general", "Saludable"));

        let summary = pet.history_summary();
        let first: Vec<String> = summary.lines().collect();
        let second: Vec<String> = summary.lines().collect();

        assert_eq!(first, second);
        assert_eq!(first[0], "History of Firulais:");
        assert!(first[1].contains("Revisión general"));

        let rendered = summary.to_string();
        assert!(rendered.starts_with("History of Firulais:\n"));
        assert!(rendered.contains("Saludable"));
    }
}
