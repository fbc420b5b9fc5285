//! Fold a class and up to five abilities into one minimum skill-rank vector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calc::eligibility::{is_selected, NONE_SELECTED};
use crate::calc::rank::SkillRank;
use crate::data::ability::{Ability, AbilityRequirement};
use crate::data::catalog::CatalogStore;
use crate::data::character::Character;
use crate::data::skill::{Skill, SkillRequirements};
use crate::error::CalcError;

pub const MAX_ABILITY_SLOTS: usize = 5;

static NO_REQUIREMENT: SkillRequirements = BTreeMap::new();

/// Minimum rank for each of the eleven skills. Always total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SkillRequirements", into = "SkillRequirements")]
pub struct RankVector(SkillRequirements);

impl Default for RankVector {
    fn default() -> Self {
        RankVector(Skill::ALL.into_iter().map(|skill| (skill, SkillRank::E)).collect())
    }
}

impl From<SkillRequirements> for RankVector {
    fn from(partial: SkillRequirements) -> Self {
        let mut vector = RankVector::default();
        vector.raise_all(&partial);
        vector
    }
}

impl From<RankVector> for SkillRequirements {
    fn from(vector: RankVector) -> Self {
        vector.0
    }
}

impl RankVector {
    pub fn get(&self, skill: Skill) -> SkillRank {
        self.0.get(&skill).copied().unwrap_or_default()
    }

    /// Raise `skill` to `rank` if that is strictly stronger than what is held.
    pub fn raise(&mut self, skill: Skill, rank: SkillRank) {
        let held = self.0.entry(skill).or_default();
        *held = held.max_with(rank);
    }

    pub fn raise_all(&mut self, requirements: &SkillRequirements) {
        for (&skill, &rank) in requirements {
            self.raise(skill, rank);
        }
    }

    /// (skill, rank) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, SkillRank)> + '_ {
        Skill::ALL.into_iter().map(|skill| (skill, self.get(skill)))
    }

    /// Skills that need more than the default rank.
    pub fn raised(&self) -> impl Iterator<Item = (Skill, SkillRank)> + '_ {
        self.iter().filter(|(_, rank)| *rank > SkillRank::E)
    }
}

/// The current picks coming from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub character: String,
    #[serde(default)]
    pub class: Option<String>,
    /// Ability slots; blank or `-----` entries are empty slots.
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl Selection {
    pub fn new(character: impl Into<String>) -> Self {
        Selection {
            character: character.into(),
            ..Selection::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.push(ability.into());
        self
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.class.as_deref().filter(|name| is_selected(name))
    }

    pub fn selected_abilities(&self) -> impl Iterator<Item = &str> {
        self.abilities
            .iter()
            .map(String::as_str)
            .filter(|name| is_selected(name))
    }

    /// Class name with the sentinel standing in for "none".
    pub fn class_label(&self) -> String {
        self.selected_class().unwrap_or(NONE_SELECTED).to_string()
    }

    /// Ability slot names with the sentinel standing in for empty slots.
    pub fn ability_labels(&self) -> Vec<String> {
        self.abilities
            .iter()
            .map(|name| {
                if is_selected(name) {
                    name.clone()
                } else {
                    NONE_SELECTED.to_string()
                }
            })
            .collect()
    }
}

/// Ranks needed to learn `ability`. A budding talent needs nothing; a class-gated ability
/// takes the first listed class's requirements, not the cheapest.
pub fn ability_requirement<'a>(
    catalog: &'a CatalogStore,
    character: &Character,
    ability: &'a Ability,
) -> Result<&'a SkillRequirements, CalcError> {
    if character.has_budding_talent(&ability.name) {
        return Ok(&NO_REQUIREMENT);
    }
    match &ability.requirement {
        AbilityRequirement::Skills(skills) => Ok(skills),
        AbilityRequirement::Classes(classes) => match classes.first() {
            Some(first) => Ok(&catalog.class(first)?.skill_requirements),
            None => Ok(&NO_REQUIREMENT),
        },
        AbilityRequirement::Unspecified => Ok(&NO_REQUIREMENT),
    }
}

/// Minimum ranks for the selected class and abilities. Any failed lookup fails the whole call.
pub fn aggregate(catalog: &CatalogStore, selection: &Selection) -> Result<RankVector, CalcError> {
    if selection.abilities.len() > MAX_ABILITY_SLOTS {
        return Err(CalcError::TooManyAbilities(selection.abilities.len()));
    }
    let character = catalog.character(&selection.character)?;

    let mut minimum = RankVector::default();
    if let Some(class_name) = selection.selected_class() {
        minimum.raise_all(&catalog.class(class_name)?.skill_requirements);
    }
    for ability_name in selection.selected_abilities() {
        let ability = catalog.ability(ability_name)?;
        minimum.raise_all(ability_requirement(catalog, character, ability)?);
    }

    tracing::debug!(
        character = %character.name,
        class = ?selection.selected_class(),
        raised = minimum.raised().count(),
        "aggregated requirements"
    );
    Ok(minimum)
}
