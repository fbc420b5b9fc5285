use std::collections::BTreeSet;
use std::path::Path;

use skillcalc::calc::{
    aggregate, eligible_abilities, eligible_classes, RankVector, Selection, SkillRank,
    NONE_SELECTED,
};
use skillcalc::data::validate::validate_catalog_dir;
use skillcalc::data::{
    load_catalog_blocking, Ability, AbilityRequirement, CatalogStore, Character, CombatClass, Sex,
    Skill,
};
use skillcalc::error::CalcError;

fn sample_catalog() -> CatalogStore {
    load_catalog_blocking(Path::new("data")).expect("runtime should start")
}

fn assert_at_least(stronger: &RankVector, weaker: &RankVector) {
    for skill in Skill::ALL {
        assert!(
            stronger.get(skill) >= weaker.get(skill),
            "{skill} dropped from {} to {}",
            weaker.get(skill),
            stronger.get(skill)
        );
    }
}

#[test]
fn mercenary_with_vantage_keeps_stronger_sword_rank() {
    let byleth = Character {
        name: "Byleth".to_string(),
        sex: Sex::Male,
        special_classes: BTreeSet::new(),
        budding_talent_name: None,
        dark_magic_user: false,
        portrait_filename: None,
    };
    let mercenary = CombatClass {
        name: "Mercenary".to_string(),
        special: false,
        sex_requirement: None,
        skill_requirements: [(Skill::Sword, SkillRank::D)].into_iter().collect(),
    };
    let vantage = Ability {
        name: "Vantage".to_string(),
        requirement: AbilityRequirement::Skills(
            [(Skill::Sword, SkillRank::C), (Skill::Brawling, SkillRank::EPlus)]
                .into_iter()
                .collect(),
        ),
        dark_magic: false,
        black_magic: false,
        icon_filename: None,
    };
    let catalog = CatalogStore::from_records(vec![byleth], vec![mercenary], vec![vantage]);

    let selection = Selection::new("Byleth")
        .with_class("Mercenary")
        .with_ability("Vantage");
    let vector = aggregate(&catalog, &selection).expect("aggregate should succeed");

    assert_eq!(vector.get(Skill::Sword), SkillRank::C);
    assert_eq!(vector.get(Skill::Brawling), SkillRank::EPlus);
    for skill in Skill::ALL {
        if skill != Skill::Sword && skill != Skill::Brawling {
            assert_eq!(vector.get(skill), SkillRank::E, "{skill} should stay at E");
        }
    }
}

#[test]
fn empty_selection_is_all_e() {
    let catalog = sample_catalog();
    let selection = Selection {
        character: "Claude".to_string(),
        class: Some(NONE_SELECTED.to_string()),
        abilities: vec![NONE_SELECTED.to_string(); 5],
    };
    let vector = aggregate(&catalog, &selection).expect("aggregate should succeed");
    assert_eq!(vector, RankVector::default());
}

#[test]
fn adding_abilities_never_lowers_a_rank() {
    let catalog = sample_catalog();
    for character in catalog.characters() {
        let abilities = eligible_abilities(&catalog, character);
        let classes = eligible_classes(&catalog, character);
        for class in classes.iter().take(6) {
            let mut selection = Selection::new(character.name.as_str()).with_class(class.as_str());
            let mut previous = aggregate(&catalog, &selection).expect("class alone should aggregate");
            for ability in abilities.iter().skip(1).take(5) {
                selection = selection.with_ability(ability.as_str());
                let next = aggregate(&catalog, &selection).expect("eligible abilities should aggregate");
                assert_at_least(&next, &previous);
                previous = next;
            }
        }
    }
}

#[test]
fn budding_talent_contributes_nothing() {
    let catalog = sample_catalog();

    let with_talent = aggregate(&catalog, &Selection::new("Linhardt").with_ability("Lethality"))
        .expect("Linhardt should aggregate");
    assert_eq!(with_talent, RankVector::default());

    let direct_talent = aggregate(&catalog, &Selection::new("Ingrid").with_ability("Lancebreaker"))
        .expect("Ingrid should aggregate");
    assert_eq!(direct_talent, RankVector::default());
    let direct_for_others = aggregate(&catalog, &Selection::new("Dimitri").with_ability("Lancebreaker"))
        .expect("Dimitri should aggregate");
    assert_eq!(direct_for_others.get(Skill::Lance), SkillRank::C);

    let without_talent = aggregate(&catalog, &Selection::new("Byleth").with_ability("Lethality"))
        .expect("Byleth should aggregate");
    assert_eq!(without_talent.get(Skill::Sword), SkillRank::B);
    assert_eq!(without_talent.get(Skill::Bow), SkillRank::C);
}

#[test]
fn class_gated_ability_uses_first_listed_class() {
    let catalog = sample_catalog();
    let vector = aggregate(&catalog, &Selection::new("Byleth").with_ability("Alert Stance"))
        .expect("aggregate should succeed");
    // Swordmaster (sword B) is listed before Assassin (sword B, bow C).
    assert_eq!(vector.get(Skill::Sword), SkillRank::B);
    assert_eq!(vector.get(Skill::Bow), SkillRank::E);
}

#[test]
fn special_classes_only_for_characters_naming_them() {
    let catalog = sample_catalog();
    let specials: Vec<&CombatClass> = catalog.classes().filter(|class| class.special).collect();
    assert!(!specials.is_empty());

    for character in catalog.characters() {
        let eligible = eligible_classes(&catalog, character);
        for class in &specials {
            assert_eq!(
                eligible.contains(&class.name),
                character.special_classes.contains(&class.name),
                "{} / {}",
                character.name,
                class.name
            );
        }
    }
}

#[test]
fn sex_restricted_classes_and_abilities() {
    let catalog = sample_catalog();
    let ingrid = catalog.character("Ingrid").unwrap();
    let dimitri = catalog.character("Dimitri").unwrap();

    assert!(eligible_classes(&catalog, ingrid).contains(&"Pegasus Knight".to_string()));
    assert!(!eligible_classes(&catalog, dimitri).contains(&"Pegasus Knight".to_string()));
    assert!(eligible_abilities(&catalog, ingrid).contains(&"Darting Blow".to_string()));
    assert!(!eligible_abilities(&catalog, dimitri).contains(&"Darting Blow".to_string()));
}

#[test]
fn dark_and_black_magic_are_mutually_exclusive() {
    let catalog = sample_catalog();
    for character in catalog.characters() {
        let abilities = eligible_abilities(&catalog, character);
        let has = |name: &str| abilities.iter().any(|a| a == name);
        assert_eq!(has("Dark Magic Crit +10"), character.dark_magic_user, "{}", character.name);
        assert_eq!(has("Black Magic Crit +10"), !character.dark_magic_user, "{}", character.name);
    }
}

#[test]
fn enumerations_are_sentinel_prefixed_and_sorted() {
    let catalog = sample_catalog();
    let byleth = catalog.character("Byleth").unwrap();
    for list in [eligible_classes(&catalog, byleth), eligible_abilities(&catalog, byleth)] {
        assert_eq!(list[0], NONE_SELECTED);
        let mut sorted = list[1..].to_vec();
        sorted.sort();
        assert_eq!(&list[1..], sorted.as_slice());
    }
}

#[test]
fn unknown_character_fails_without_partial_result() {
    let catalog = sample_catalog();
    assert_eq!(
        aggregate(&catalog, &Selection::new("Sothis")),
        Err(CalcError::not_found("character", "Sothis"))
    );
    assert_eq!(
        aggregate(&catalog, &Selection::new("Byleth").with_class("Lord")),
        Err(CalcError::not_found("class", "Lord"))
    );
}

#[test]
fn sample_catalog_loads_and_validates() {
    let catalog = sample_catalog();
    assert_eq!(catalog.counts(), (10, 35, 21));

    let report = validate_catalog_dir(Path::new("data")).expect("sample data should be readable");
    assert!(!report.has_errors(), "{:?}", report.diagnostics);
}
