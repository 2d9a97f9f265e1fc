use crate::domain::model::Pet;

/// 名稱比對不分大小寫 (Unicode)
pub fn names_match(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

pub fn position_by_name<'a, I>(pets: I, name: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a Pet>,
{
    pets.into_iter().position(|pet| names_match(pet.name(), name))
}

pub fn find_first<'a, I>(pets: I, name: &str) -> Option<&'a Pet>
where
    I: IntoIterator<Item = &'a Pet>,
{
    pets.into_iter().find(|pet| names_match(pet.name(), name))
}

/// 寵物名不分大小寫，飼主名需完全相同
pub fn position_with_owner<'a, I>(pets: I, name: &str, owner_name: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a Pet>,
{
    pets.into_iter()
        .position(|pet| names_match(pet.name(), name) && pet.owner().name == owner_name)
}
