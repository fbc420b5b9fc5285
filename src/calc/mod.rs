pub mod eligibility;
pub mod rank;
pub mod requirements;

pub use eligibility::{
    can_hold_class, can_learn_ability, eligible_abilities, eligible_abilities_for,
    eligible_classes, eligible_classes_for, is_selected, NONE_SELECTED,
};
pub use rank::{compare_rank, SkillRank};
pub use requirements::{
    ability_requirement, aggregate, RankVector, Selection, MAX_ABILITY_SLOTS,
};
