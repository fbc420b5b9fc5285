//! Abilities: learnable either through direct skill ranks or through mastering a class.

use serde::{Deserialize, Serialize};

use crate::data::skill::SkillRequirements;

pub const DEFAULT_ABILITIES_FILE: &str = "abilities.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityRequirement {
    /// Learned by reaching these ranks.
    Skills(SkillRequirements),
    /// Learned by mastering any one of these classes, in listed order.
    Classes(Vec<String>),
    /// Neither kind declared; nobody can learn it.
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AbilityRecord", into = "AbilityRecord")]
pub struct Ability {
    pub name: String,
    pub requirement: AbilityRequirement,
    /// Only dark-magic users may learn it.
    pub dark_magic: bool,
    /// Dark-magic users may not learn it.
    pub black_magic: bool,
    pub icon_filename: Option<String>,
}

impl Ability {
    pub fn icon_path(&self) -> String {
        let file = self
            .icon_filename
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase());
        format!("resources/abilityicons/{file}.png")
    }
}

/// On-disk shape. A record may carry both requirement keys; the skill mapping wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbilityRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skill_requirement: Option<SkillRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_requirement: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    dark_magic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    black_magic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon_filename: Option<String>,
}

impl From<AbilityRecord> for Ability {
    fn from(record: AbilityRecord) -> Self {
        let requirement = match (record.skill_requirement, record.class_requirement) {
            (Some(skills), _) => AbilityRequirement::Skills(skills),
            (None, Some(classes)) if !classes.is_empty() => AbilityRequirement::Classes(classes),
            _ => AbilityRequirement::Unspecified,
        };
        Ability {
            name: record.name,
            requirement,
            dark_magic: record.dark_magic,
            black_magic: record.black_magic,
            icon_filename: record.icon_filename,
        }
    }
}

impl From<Ability> for AbilityRecord {
    fn from(ability: Ability) -> Self {
        let (skill_requirement, class_requirement) = match ability.requirement {
            AbilityRequirement::Skills(skills) => (Some(skills), None),
            AbilityRequirement::Classes(classes) => (None, Some(classes)),
            AbilityRequirement::Unspecified => (None, None),
        };
        AbilityRecord {
            name: ability.name,
            skill_requirement,
            class_requirement,
            dark_magic: ability.dark_magic,
            black_magic: ability.black_magic,
            icon_filename: ability.icon_filename,
        }
    }
}
