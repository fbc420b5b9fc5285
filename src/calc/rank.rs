//! Skill rank scale: twelve letter grades from E (weakest, the default) to S+.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SkillRank {
    #[default]
    E,
    EPlus,
    D,
    DPlus,
    C,
    CPlus,
    B,
    BPlus,
    A,
    APlus,
    S,
    SPlus,
}

impl SkillRank {
    /// Every rank, weakest first.
    pub const ALL: [SkillRank; 12] = [
        SkillRank::E,
        SkillRank::EPlus,
        SkillRank::D,
        SkillRank::DPlus,
        SkillRank::C,
        SkillRank::CPlus,
        SkillRank::B,
        SkillRank::BPlus,
        SkillRank::A,
        SkillRank::APlus,
        SkillRank::S,
        SkillRank::SPlus,
    ];

    /// Lower-case label used in the data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E => "e",
            Self::EPlus => "e+",
            Self::D => "d",
            Self::DPlus => "d+",
            Self::C => "c",
            Self::CPlus => "c+",
            Self::B => "b",
            Self::BPlus => "b+",
            Self::A => "a",
            Self::APlus => "a+",
            Self::S => "s",
            Self::SPlus => "s+",
        }
    }

    /// Position on the scale, 0 for E through 11 for S+.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Keep the stronger of the two; ties keep `self`.
    pub fn max_with(self, other: SkillRank) -> SkillRank {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for SkillRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for SkillRank {
    type Err = CalcError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let label = raw.to_ascii_lowercase();
        SkillRank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == label)
            .ok_or_else(|| CalcError::UnknownRank(raw.to_string()))
    }
}

impl TryFrom<String> for SkillRank {
    type Error = CalcError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<SkillRank> for &'static str {
    fn from(rank: SkillRank) -> Self {
        rank.as_str()
    }
}

/// Compare two rank labels on the E < E+ < ... < S+ scale.
pub fn compare_rank(a: &str, b: &str) -> Result<Ordering, CalcError> {
    let a: SkillRank = a.parse()?;
    let b: SkillRank = b.parse()?;
    Ok(a.cmp(&b))
}
