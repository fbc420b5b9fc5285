//! Which classes a character may certify into and which abilities it may learn.

use crate::data::ability::{Ability, AbilityRequirement};
use crate::data::catalog::CatalogStore;
use crate::data::character::Character;
use crate::data::combat_class::CombatClass;
use crate::error::CalcError;

/// Placeholder for an empty class or ability slot.
pub const NONE_SELECTED: &str = "-----";

/// True when `slot` names something rather than the empty placeholder.
pub fn is_selected(slot: &str) -> bool {
    let slot = slot.trim();
    !slot.is_empty() && slot != NONE_SELECTED
}

/// Special classes ignore sex entirely; everything else only checks the sex restriction.
pub fn can_hold_class(character: &Character, class: &CombatClass) -> bool {
    if class.special {
        return character.special_classes.contains(&class.name);
    }
    class
        .sex_requirement
        .map_or(true, |sex| sex == character.sex)
}

pub fn can_learn_ability(
    catalog: &CatalogStore,
    character: &Character,
    ability: &Ability,
) -> Result<bool, CalcError> {
    if character.has_budding_talent(&ability.name) {
        return Ok(true);
    }

    match &ability.requirement {
        AbilityRequirement::Skills(_) => {
            if ability.dark_magic {
                Ok(character.dark_magic_user)
            } else if ability.black_magic {
                Ok(!character.dark_magic_user)
            } else {
                Ok(true)
            }
        }
        AbilityRequirement::Classes(names) => {
            // Resolve every listed class so a dangling reference is reported
            // regardless of its position in the list.
            let classes = names
                .iter()
                .map(|name| catalog.class(name))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(classes.into_iter().any(|class| can_hold_class(character, class)))
        }
        AbilityRequirement::Unspecified => Ok(false),
    }
}

/// Sentinel followed by every usable class name, in name order.
pub fn eligible_classes(catalog: &CatalogStore, character: &Character) -> Vec<String> {
    let mut names = vec![NONE_SELECTED.to_string()];
    names.extend(
        catalog
            .classes()
            .filter(|class| can_hold_class(character, class))
            .map(|class| class.name.clone()),
    );
    names
}

/// Sentinel followed by every learnable ability name, in name order.
/// Abilities referencing classes missing from the catalog are left out.
pub fn eligible_abilities(catalog: &CatalogStore, character: &Character) -> Vec<String> {
    let mut names = vec![NONE_SELECTED.to_string()];
    for ability in catalog.abilities() {
        match can_learn_ability(catalog, character, ability) {
            Ok(true) => names.push(ability.name.clone()),
            Ok(false) => {}
            Err(err) => tracing::warn!(
                character = %character.name,
                ability = %ability.name,
                "omitting ability from eligible list: {err}"
            ),
        }
    }
    names
}

/// Name-based variants for callers holding only the selected character's name.
pub fn eligible_classes_for(catalog: &CatalogStore, character: &str) -> Result<Vec<String>, CalcError> {
    Ok(eligible_classes(catalog, catalog.character(character)?))
}

pub fn eligible_abilities_for(
    catalog: &CatalogStore,
    character: &str,
) -> Result<Vec<String>, CalcError> {
    Ok(eligible_abilities(catalog, catalog.character(character)?))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::data::character::Sex;
    use crate::data::skill::SkillRequirements;

    use super::*;

    fn character(name: &str, sex: Sex, specials: &[&str], dark: bool) -> Character {
        Character {
            name: name.to_string(),
            sex,
            special_classes: specials.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            budding_talent_name: None,
            dark_magic_user: dark,
            portrait_filename: None,
        }
    }

    fn class(name: &str, special: bool, sex: Option<Sex>) -> CombatClass {
        CombatClass {
            name: name.to_string(),
            special,
            sex_requirement: sex,
            skill_requirements: SkillRequirements::new(),
        }
    }

    fn skill_ability(name: &str, dark: bool, black: bool) -> Ability {
        Ability {
            name: name.to_string(),
            requirement: AbilityRequirement::Skills(SkillRequirements::new()),
            dark_magic: dark,
            black_magic: black,
            icon_filename: None,
        }
    }

    fn class_ability(name: &str, classes: &[&str]) -> Ability {
        Ability {
            name: name.to_string(),
            requirement: AbilityRequirement::Classes(classes.iter().map(|s| s.to_string()).collect()),
            dark_magic: false,
            black_magic: false,
            icon_filename: None,
        }
    }

    #[test]
    fn special_class_requires_permission_regardless_of_sex() {
        let lord = class("Armored Lord", true, None);
        let edelgard = character("Edelgard", Sex::Female, &["Armored Lord"], false);
        let dorothea = character("Dorothea", Sex::Female, &[], false);
        assert!(can_hold_class(&edelgard, &lord));
        assert!(!can_hold_class(&dorothea, &lord));
    }

    #[test]
    fn sex_requirement_is_enforced_for_ordinary_classes() {
        let pegasus = class("Pegasus Knight", false, Some(Sex::Female));
        assert!(can_hold_class(&character("Ingrid", Sex::Female, &[], false), &pegasus));
        assert!(!can_hold_class(&character("Sylvain", Sex::Male, &[], false), &pegasus));
        assert!(can_hold_class(
            &character("Sylvain", Sex::Male, &[], false),
            &class("Cavalier", false, None)
        ));
    }

    #[test]
    fn magic_flags_split_dark_and_non_dark_users() {
        let catalog = CatalogStore::new();
        let hubert = character("Hubert", Sex::Male, &[], true);
        let lysithea = character("Lysithea", Sex::Female, &[], false);
        let dark = skill_ability("Dark Tomefaire", true, false);
        let black = skill_ability("Black Tomefaire", false, true);

        assert_eq!(can_learn_ability(&catalog, &hubert, &dark), Ok(true));
        assert_eq!(can_learn_ability(&catalog, &lysithea, &dark), Ok(false));
        assert_eq!(can_learn_ability(&catalog, &hubert, &black), Ok(false));
        assert_eq!(can_learn_ability(&catalog, &lysithea, &black), Ok(true));
    }

    #[test]
    fn budding_talent_bypasses_every_rule() {
        let catalog = CatalogStore::new();
        let mut lysithea = character("Lysithea", Sex::Female, &[], false);
        lysithea.budding_talent_name = Some("Dark Tomefaire".to_string());
        let dark = skill_ability("Dark Tomefaire", true, false);
        assert_eq!(can_learn_ability(&catalog, &lysithea, &dark), Ok(true));

        let unlearnable = Ability {
            requirement: AbilityRequirement::Unspecified,
            ..skill_ability("Dark Tomefaire", false, false)
        };
        assert_eq!(can_learn_ability(&catalog, &lysithea, &unlearnable), Ok(true));
    }

    #[test]
    fn class_ability_needs_any_holdable_class() {
        let catalog = CatalogStore::from_records(
            vec![],
            vec![
                class("Pegasus Knight", false, Some(Sex::Female)),
                class("Wyvern Rider", false, None),
            ],
            vec![],
        );
        let ability = class_ability("Darting Blow", &["Pegasus Knight", "Wyvern Rider"]);
        let claude = character("Claude", Sex::Male, &[], false);
        assert_eq!(can_learn_ability(&catalog, &claude, &ability), Ok(true));

        let only_pegasus = class_ability("Alert Stance", &["Pegasus Knight"]);
        assert_eq!(can_learn_ability(&catalog, &claude, &only_pegasus), Ok(false));
    }

    #[test]
    fn dangling_class_reference_is_not_found() {
        let catalog = CatalogStore::new();
        let ability = class_ability("Lunge", &["Swordmaster"]);
        let felix = character("Felix", Sex::Male, &[], false);
        assert_eq!(
            can_learn_ability(&catalog, &felix, &ability),
            Err(CalcError::not_found("class", "Swordmaster"))
        );
    }

    #[test]
    fn unspecified_requirement_is_never_learnable() {
        let catalog = CatalogStore::new();
        let ability = Ability {
            requirement: AbilityRequirement::Unspecified,
            ..skill_ability("Mystery", false, false)
        };
        let byleth = character("Byleth", Sex::Male, &[], false);
        assert_eq!(can_learn_ability(&catalog, &byleth, &ability), Ok(false));
    }

    #[test]
    fn enumerations_start_with_sentinel_and_skip_dangling_entries() {
        let catalog = CatalogStore::from_records(
            vec![character("Felix", Sex::Male, &[], false)],
            vec![
                class("Swordmaster", false, None),
                class("Pegasus Knight", false, Some(Sex::Female)),
                class("Armored Lord", true, None),
            ],
            vec![
                skill_ability("Vantage", false, false),
                class_ability("Lunge", &["Swordmaster"]),
                class_ability("Ghost Step", &["Assassin"]),
            ],
        );
        assert_eq!(
            eligible_classes_for(&catalog, "Felix").unwrap(),
            vec![NONE_SELECTED, "Swordmaster"]
        );
        assert_eq!(
            eligible_abilities_for(&catalog, "Felix").unwrap(),
            vec![NONE_SELECTED, "Lunge", "Vantage"]
        );
        assert!(eligible_classes_for(&catalog, "Nobody").is_err());
    }

    #[test]
    fn sentinel_and_blank_slots_are_not_selections() {
        assert!(!is_selected(NONE_SELECTED));
        assert!(!is_selected("  "));
        assert!(is_selected("Vantage"));
    }
}
