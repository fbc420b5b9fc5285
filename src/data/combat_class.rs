use serde::{Deserialize, Serialize};

use crate::data::character::Sex;
use crate::data::skill::SkillRequirements;

pub const DEFAULT_CLASSES_FILE: &str = "classes.json";

/// A class a character can certify into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatClass {
    pub name: String,
    /// Restricted to characters listing this class in `special_classes`.
    #[serde(default)]
    pub special: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex_requirement: Option<Sex>,
    #[serde(default)]
    pub skill_requirements: SkillRequirements,
}
