//! The eleven weapon/magic/movement skills every character is ranked in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calc::SkillRank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Sword,
    Lance,
    Axe,
    Bow,
    Brawling,
    Reason,
    Faith,
    Authority,
    HeavyArmor,
    Riding,
    Flying,
}

/// Skill -> minimum rank. Unmentioned skills default to E.
pub type SkillRequirements = BTreeMap<Skill, SkillRank>;

impl Skill {
    /// Display order used by the requirement table.
    pub const ALL: [Skill; 11] = [
        Skill::Sword,
        Skill::Lance,
        Skill::Axe,
        Skill::Bow,
        Skill::Brawling,
        Skill::Reason,
        Skill::Faith,
        Skill::Authority,
        Skill::HeavyArmor,
        Skill::Riding,
        Skill::Flying,
    ];

    /// JSON key as it appears in the data files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Lance => "lance",
            Self::Axe => "axe",
            Self::Bow => "bow",
            Self::Brawling => "brawling",
            Self::Reason => "reason",
            Self::Faith => "faith",
            Self::Authority => "authority",
            Self::HeavyArmor => "heavyArmor",
            Self::Riding => "riding",
            Self::Flying => "flying",
        }
    }

    pub fn from_key(key: &str) -> Option<Skill> {
        Skill::ALL.into_iter().find(|skill| skill.key() == key)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
