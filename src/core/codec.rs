//! 寵物表 (CSV) 與就診文件 (JSON) 的編碼與解碼。
//!
//! 只處理位元組，不碰檔案系統；讀寫交給 [`crate::domain::ports::Storage`]。

use crate::domain::model::{Owner, Pet, VisitRecord};
use crate::domain::registry::Registry;
use crate::utils::error::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub const CSV_HEADERS: [&str; 7] = [
    "pet_name",
    "species",
    "breed",
    "age",
    "owner_name",
    "owner_phone",
    "owner_address",
];

/// 就診文件鍵的分隔字元 (`<寵物名>_<飼主名>`)
pub const VISIT_KEY_SEPARATOR: char = '_';

const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Serialize, Deserialize)]
struct PetRow {
    pet_name: String,
    species: String,
    breed: String,
    age: String,
    owner_name: String,
    owner_phone: String,
    owner_address: String,
}

impl From<&Pet> for PetRow {
    fn from(pet: &Pet) -> Self {
        let owner = pet.owner();
        Self {
            pet_name: pet.name().to_string(),
            species: pet.species().to_string(),
            breed: pet.breed().to_string(),
            age: pet.age().to_string(),
            owner_name: owner.name.clone(),
            owner_phone: owner.phone.clone(),
            owner_address: owner.address.clone(),
        }
    }
}

impl TryFrom<PetRow> for Pet {
    type Error = ClinicError;

    fn try_from(row: PetRow) -> Result<Self> {
        let age = parse_age(&row.age)?;
        let owner = Owner::new(row.owner_name, row.owner_phone, row.owner_address);
        Pet::new(row.pet_name, row.species, row.breed, i64::from(age), owner)
    }
}

/// 年齡欄位必須全為 ASCII 數字，`-3`、`+3`、` 3` 都視為無效
fn parse_age(raw: &str) -> Result<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClinicError::parse(format!(
            "age '{}' is not a valid number",
            raw
        )));
    }

    raw.parse::<u32>()
        .map_err(|e| ClinicError::parse(format!("age '{}' is out of range: {}", raw, e)))
}

pub fn visit_key(pet: &Pet) -> String {
    format!("{}{}{}", pet.name(), VISIT_KEY_SEPARATOR, pet.owner().name)
}

/// 以第一個 `_` 切開；寵物名本身含 `_` 時會切錯，屬已知限制
pub fn split_visit_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(VISIT_KEY_SEPARATOR)
}

pub fn encode_pets_csv(registry: &Registry) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // 空的登錄也要有表頭
    writer.write_record(CSV_HEADERS)?;
    for pet in registry {
        writer.serialize(PetRow::from(pet))?;
    }

    writer
        .into_inner()
        .map_err(|e| ClinicError::IoError(e.into_error()))
}

pub fn encode_visits_json(registry: &Registry) -> Result<Vec<u8>> {
    let mut document = serde_json::Map::new();
    for pet in registry {
        // 相同鍵會覆蓋先前的值，但保留第一次出現的位置
        document.insert(visit_key(pet), serde_json::to_value(pet.visits())?);
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    document.serialize(&mut serializer)?;
    Ok(buffer)
}

#[derive(Debug, Default)]
pub struct DecodedPets {
    pub pets: Vec<Pet>,
    pub skipped_rows: usize,
}

/// 逐列解碼。壞列記錄警告後略過；只有底層 I/O 錯誤會中止整個解碼。
pub fn decode_pets_csv(data: &[u8]) -> Result<DecodedPets> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);
    let headers = reader.headers()?.clone();

    let mut decoded = DecodedPets::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable CSV row: {}", e);
                decoded.skipped_rows += 1;
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let pet = record
            .deserialize::<PetRow>(Some(&headers))
            .map_err(ClinicError::from)
            .and_then(Pet::try_from);

        match pet {
            Ok(pet) => decoded.pets.push(pet),
            Err(e) => {
                tracing::warn!(
                    "Skipping invalid CSV row at line {}: {:?} - {}",
                    line,
                    record.iter().collect::<Vec<_>>(),
                    e
                );
                decoded.skipped_rows += 1;
            }
        }
    }

    Ok(decoded)
}

pub type VisitBlock = (String, Vec<VisitRecord>);

/// 解碼就診文件，保留文件中的鍵順序。任何結構錯誤都使整份文件失敗。
pub fn decode_visits_json(data: &[u8]) -> Result<Vec<VisitBlock>> {
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(data)?;

    document
        .into_iter()
        .map(|(key, value)| -> Result<VisitBlock> {
            let visits: Vec<VisitRecord> = serde_json::from_value(value)?;
            Ok((key, visits))
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VisitMerge {
    pub applied: usize,
    pub dropped: usize,
}

/// 依鍵將就診紀錄附加到寵物；寵物名與飼主名都必須相符
pub fn apply_visit_blocks(registry: &mut Registry, blocks: Vec<VisitBlock>) -> VisitMerge {
    let mut merge = VisitMerge::default();

    for (key, visits) in blocks {
        let Some((pet_name, owner_name)) = split_visit_key(&key) else {
            tracing::warn!("Dropping visit block with malformed key '{}'", key);
            merge.dropped += 1;
            continue;
        };

        match registry.find_by_name_and_owner_mut(pet_name, owner_name) {
            Some(pet) => {
                for visit in visits {
                    pet.add_visit(visit);
                }
                merge.applied += 1;
            }
            None => {
                tracing::debug!("No pet matches visit block '{}', dropping it", key);
                merge.dropped += 1;
            }
        }
    }

    merge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        let mut firulais = Pet::new(
            "Firulais",
            "Dog",
            "Labrador",
            5,
            Owner::new("Carlos", "123456789", "Calle Falsa 123"),
        )
        .unwrap();
        firulais.add_visit(VisitRecord::new("01/06/2025", "Revisión general", "Saludable"));
        registry.add(firulais);
        registry.add(
            Pet::new("Misu", "Cat", "Persian", 2, Owner::new("Ana", "555", "Av. Siempre Viva, 742")).unwrap(),
        );
        registry
    }

    #[test]
    fn test_encode_pets_csv_layout() {
        let csv = String::from_utf8(encode_pets_csv(&sample_registry()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "pet_name,species,breed,age,owner_name,owner_phone,owner_address"
        );
        assert_eq!(lines[1], "Firulais,Dog,Labrador,5,Carlos,123456789,Calle Falsa 123");
        // 含逗號的欄位需加引號
        assert_eq!(lines[2], "Misu,Cat,Persian,2,Ana,555,\"Av. Siempre Viva, 742\"");
    }

    #[test]
    fn test_encode_empty_registry_keeps_header() {
        let csv = String::from_utf8(encode_pets_csv(&Registry::new()).unwrap()).unwrap();
        assert_eq!(
            csv,
            "pet_name,species,breed,age,owner_name,owner_phone,owner_address\n"
        );
    }

    #[test]
    fn test_encode_visits_json_layout() {
        let json = String::from_utf8(encode_visits_json(&sample_registry()).unwrap()).unwrap();

        assert!(json.starts_with("{\n    \"Firulais_Carlos\": [\n        {"));
        let firulais = json.find("Firulais_Carlos").unwrap();
        let misu = json.find("Misu_Ana").unwrap();
        assert!(firulais < misu);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Firulais_Carlos"][0]["diagnosis"], "Saludable");
        assert_eq!(value["Misu_Ana"], serde_json::json!([]));
    }

    #[test]
    fn test_split_visit_key_uses_first_separator() {
        assert_eq!(split_visit_key("Firulais_Carlos"), Some(("Firulais", "Carlos")));
        assert_eq!(split_visit_key("Rex_Ana_Maria"), Some(("Rex", "Ana_Maria")));
        assert_eq!(split_visit_key("NoSeparator"), None);
    }

    #[test]
    fn test_decode_skips_non_numeric_age() {
        let data = b"pet_name,species,breed,age,owner_name,owner_phone,owner_address\n\
Rex,Dog,Mix,abc,Ana,1,Street\n\
Misu,Cat,Persian,2,Luis,2,Avenue\n";

        let decoded = decode_pets_csv(data).unwrap();
        assert_eq!(decoded.skipped_rows, 1);
        assert_eq!(decoded.pets.len(), 1);
        assert_eq!(decoded.pets[0].name(), "Misu");
    }

    #[test]
    fn test_decode_rejects_signed_ages() {
        let data = b"pet_name,species,breed,age,owner_name,owner_phone,owner_address\n\
Rex,Dog,Mix,-3,Ana,1,Street\n\
Max,Dog,Mix,+4,Ana,1,Street\n";

        let decoded = decode_pets_csv(data).unwrap();
        assert_eq!(decoded.skipped_rows, 2);
        assert!(decoded.pets.is_empty());
    }

    #[test]
    fn test_decode_skips_short_rows() {
        let data = b"pet_name,species,breed,age,owner_name,owner_phone,owner_address\n\
Rex,Dog,Mix,4\n\
Misu,Cat,Persian,2,Luis,2,Avenue\n";

        let decoded = decode_pets_csv(data).unwrap();
        assert_eq!(decoded.skipped_rows, 1);
        assert_eq!(decoded.pets[0].owner().address, "Avenue");
    }

    #[test]
    fn test_decode_missing_column_skips_every_row() {
        let data = b"pet_name,species,breed,age,owner_name,owner_phone\n\
Rex,Dog,Mix,4,Ana,1\n";

        let decoded = decode_pets_csv(data).unwrap();
        assert_eq!(decoded.skipped_rows, 1);
        assert!(decoded.pets.is_empty());
    }

    #[test]
    fn test_decode_visits_preserves_document_order() {
        let data = br#"{
            "Zeus_Ana": [{"date": "1", "reason": "a", "diagnosis": "b"}],
            "Apolo_Luis": []
        }"#;

        let blocks = decode_visits_json(data).unwrap();
        let keys: Vec<&str> = blocks.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zeus_Ana", "Apolo_Luis"]);
        assert_eq!(blocks[0].1[0].reason, "a");
    }

    #[test]
    fn test_decode_visits_rejects_missing_keys() {
        let data = br#"{"Zeus_Ana": [{"date": "1", "reason": "a"}]}"#;
        assert!(matches!(
            decode_visits_json(data),
            Err(ClinicError::SerializationError(_))
        ));
    }

    #[test]
    fn test_apply_visit_blocks_requires_owner_match() {
        let mut registry = sample_registry();
        let blocks = vec![
            (
                "misu_Ana".to_string(),
                vec![VisitRecord::new("02/06/2025", "Vaccine", "Done")],
            ),
            (
                "Misu_Pedro".to_string(),
                vec![VisitRecord::new("03/06/2025", "Ignored", "Ignored")],
            ),
            ("garbage".to_string(), vec![]),
        ];

        let merge = apply_visit_blocks(&mut registry, blocks);
        assert_eq!(merge, VisitMerge { applied: 1, dropped: 2 });

        let misu = registry.find_by_name("Misu").unwrap();
        assert_eq!(misu.visits().len(), 1);
        assert_eq!(misu.visits()[0].reason, "Vaccine");
    }
}
