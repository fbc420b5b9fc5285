pub mod ability;
pub mod catalog;
pub mod character;
pub mod combat_class;
pub mod loader;
pub mod skill;
pub mod validate;

pub use ability::{Ability, AbilityRequirement};
pub use catalog::{CatalogRecord, CatalogStore};
pub use character::{Character, Sex};
pub use combat_class::CombatClass;
pub use loader::{load_catalog, load_catalog_blocking};
pub use skill::{Skill, SkillRequirements};
