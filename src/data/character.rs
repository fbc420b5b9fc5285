use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARACTERS_FILE: &str = "characters.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recruitable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub sex: Sex,
    /// Special classes only this character (and the others naming them) may certify into.
    #[serde(default)]
    pub special_classes: BTreeSet<String>,
    /// Ability this character learns free of every requirement.
    #[serde(default)]
    pub budding_talent_name: Option<String>,
    #[serde(default)]
    pub dark_magic_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_filename: Option<String>,
}

impl Character {
    pub fn has_budding_talent(&self, ability_name: &str) -> bool {
        self.budding_talent_name.as_deref() == Some(ability_name)
    }

    /// Portrait asset path relative to the site root.
    pub fn portrait_path(&self) -> String {
        let file = self
            .portrait_filename
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase());
        format!("resources/characterportraits/{file}.png")
    }
}
