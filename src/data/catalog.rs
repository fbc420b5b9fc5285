//! Catalog store: characters, classes and abilities keyed by name.
//! Each table is built whole and swapped in at once; afterwards it is only read.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::data::ability::Ability;
use crate::data::character::Character;
use crate::data::combat_class::CombatClass;
use crate::error::CalcError;

/// A record that can live in one of the catalog tables.
pub trait CatalogRecord: DeserializeOwned + Clone {
    const KIND: &'static str;

    fn name(&self) -> &str;
}

impl CatalogRecord for Character {
    const KIND: &'static str = "character";

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogRecord for CombatClass {
    const KIND: &'static str = "class";

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogRecord for Ability {
    const KIND: &'static str = "ability";

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    characters: BTreeMap<String, Character>,
    classes: BTreeMap<String, CombatClass>,
    abilities: BTreeMap<String, Ability>,
}

/// Duplicate names overwrite earlier entries.
fn build_table<T: CatalogRecord>(records: impl IntoIterator<Item = T>) -> BTreeMap<String, T> {
    let mut table = BTreeMap::new();
    for record in records {
        let name = record.name().to_string();
        if let Some(previous) = table.insert(name, record) {
            tracing::debug!(kind = T::KIND, name = previous.name(), "duplicate name, keeping last");
        }
    }
    table
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for tests and fixtures: build all three tables at once.
    pub fn from_records(
        characters: impl IntoIterator<Item = Character>,
        classes: impl IntoIterator<Item = CombatClass>,
        abilities: impl IntoIterator<Item = Ability>,
    ) -> Self {
        let mut store = Self::new();
        store.load_characters(characters);
        store.load_classes(classes);
        store.load_abilities(abilities);
        store
    }

    /// Replace the character table. Returns the number of distinct names held.
    pub fn load_characters(&mut self, records: impl IntoIterator<Item = Character>) -> usize {
        self.characters = build_table(records);
        self.characters.len()
    }

    pub fn load_classes(&mut self, records: impl IntoIterator<Item = CombatClass>) -> usize {
        self.classes = build_table(records);
        self.classes.len()
    }

    pub fn load_abilities(&mut self, records: impl IntoIterator<Item = Ability>) -> usize {
        self.abilities = build_table(records);
        self.abilities.len()
    }

    pub fn character(&self, name: &str) -> Result<&Character, CalcError> {
        self.characters
            .get(name)
            .ok_or_else(|| CalcError::not_found(Character::KIND, name))
    }

    pub fn class(&self, name: &str) -> Result<&CombatClass, CalcError> {
        self.classes
            .get(name)
            .ok_or_else(|| CalcError::not_found(CombatClass::KIND, name))
    }

    pub fn ability(&self, name: &str) -> Result<&Ability, CalcError> {
        self.abilities
            .get(name)
            .ok_or_else(|| CalcError::not_found(Ability::KIND, name))
    }

    /// Characters in name order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &CombatClass> {
        self.classes.values()
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.classes.is_empty() && self.abilities.is_empty()
    }

    /// (characters, classes, abilities)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.characters.len(), self.classes.len(), self.abilities.len())
    }
}
