use crate::domain::lookup;
use crate::domain::model::Pet;

/// 記憶體中的寵物清單，維持登錄順序，允許重名
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pets: Vec<Pet>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pet: Pet) -> &Pet {
        self.pets.push(pet);
        &self.pets[self.pets.len() - 1]
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Pet> {
        lookup::find_first(&self.pets, name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Pet> {
        let index = lookup::position_by_name(&self.pets, name)?;
        self.pets.get_mut(index)
    }

    pub fn find_by_name_and_owner_mut(&mut self, name: &str, owner_name: &str) -> Option<&mut Pet> {
        let index = lookup::position_with_owner(&self.pets, name, owner_name)?;
        self.pets.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.pets.clear();
    }

    pub fn list(&self) -> &[Pet] {
        &self.pets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pet> {
        self.pets.iter()
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Pet;
    type IntoIter = std::slice::Iter<'a, Pet>;

    fn into_iter(self) -> Self::IntoIter {
        self.pets.iter()
    }
}
