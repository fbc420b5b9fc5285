use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::calc::{
    aggregate, eligible_abilities, eligible_classes, RankVector, Selection, MAX_ABILITY_SLOTS,
};
use crate::data::CatalogStore;
use crate::error::CalcError;
use crate::ledger::{save_build, BuildLedger, BuildSnapshot};

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    Body(serde_json::Error),
    #[error("invalid request")]
    Validation(ValidationErrorResponse),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("failed to serialize response: {0}")]
    Serialize(serde_json::Error),
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "skillcalc-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterListItem {
    pub name: String,
    pub sex: &'static str,
    pub portrait: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budding_talent: Option<String>,
}

pub fn characters_payload(catalog: &CatalogStore) -> Result<String, serde_json::Error> {
    let list: Vec<CharacterListItem> = catalog
        .characters()
        .map(|c| CharacterListItem {
            name: c.name.clone(),
            sex: c.sex.as_str(),
            portrait: c.portrait_path(),
            budding_talent: c.budding_talent_name.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "characters": list }))
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibleResponse {
    pub character: String,
    pub classes: Vec<String>,
    pub abilities: Vec<String>,
    /// Ability name -> icon asset path, for every listed ability.
    pub icons: BTreeMap<String, String>,
}

pub fn eligible_payload(catalog: &CatalogStore, character: &str) -> Result<String, ApiError> {
    let character = catalog.character(character)?;
    let abilities = eligible_abilities(catalog, character);
    let icons = abilities
        .iter()
        .filter_map(|name| catalog.ability(name).ok())
        .map(|ability| (ability.name.clone(), ability.icon_path()))
        .collect();
    let response = EligibleResponse {
        character: character.name.clone(),
        classes: eligible_classes(catalog, character),
        abilities,
        icons,
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

/// One row of the requirement table; E is shown blank.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementRow {
    pub skill: &'static str,
    pub rank: String,
}

fn requirement_rows(vector: &RankVector) -> Vec<RequirementRow> {
    vector
        .iter()
        .map(|(skill, rank)| RequirementRow {
            skill: skill.key(),
            rank: if rank.value() == 0 {
                String::new()
            } else {
                rank.to_string()
            },
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateResponse {
    pub status: &'static str,
    pub selection: Selection,
    pub requirements: RankVector,
    pub table: Vec<RequirementRow>,
}

pub fn calculate_payload(catalog: &CatalogStore, body: &str) -> Result<String, ApiError> {
    let selection = parse_selection(body)?;
    let requirements = aggregate(catalog, &selection)?;
    let response = CalculateResponse {
        status: "ok",
        table: requirement_rows(&requirements),
        selection,
        requirements,
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildListResponse<'a> {
    pub builds: &'a [BuildSnapshot],
}

pub fn builds_payload(ledger: &BuildLedger) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&BuildListResponse {
        builds: ledger.snapshots(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedBuildResponse<'a> {
    pub status: &'static str,
    pub index: usize,
    pub build: &'a BuildSnapshot,
}

pub fn save_build_payload(
    catalog: &CatalogStore,
    ledger: &mut BuildLedger,
    body: &str,
) -> Result<String, ApiError> {
    let selection = parse_selection(body)?;
    let index = save_build(catalog, ledger, &selection)?;
    let build = &ledger.snapshots()[index];
    serde_json::to_string_pretty(&SavedBuildResponse {
        status: "ok",
        index,
        build,
    })
    .map_err(ApiError::Serialize)
}

pub fn delete_build_payload(ledger: &mut BuildLedger, raw_index: &str) -> Result<String, ApiError> {
    let index: usize = raw_index.parse().map_err(|_| {
        ApiError::Validation(validation_failed(vec![ValidationIssue {
            field: "index",
            messages: vec![format!("'{raw_index}' is not a build index")],
        }]))
    })?;
    let removed = ledger.remove_at(index)?;
    tracing::info!(index, character = %removed.character, "build deleted");
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "removed": removed,
        "remaining": ledger.len(),
    }))
    .map_err(ApiError::Serialize)
}

fn parse_selection(body: &str) -> Result<Selection, ApiError> {
    let selection: Selection = serde_json::from_str(body).map_err(ApiError::Body)?;
    validate_selection(&selection)?;
    Ok(selection)
}

fn validate_selection(selection: &Selection) -> Result<(), ApiError> {
    let mut errors: Vec<ValidationIssue> = Vec::new();

    if selection.character.trim().is_empty() {
        errors.push(ValidationIssue {
            field: "character",
            messages: vec!["must not be empty".to_string()],
        });
    }

    if selection.abilities.len() > MAX_ABILITY_SLOTS {
        errors.push(ValidationIssue {
            field: "abilities",
            messages: vec![format!("at most {MAX_ABILITY_SLOTS} ability slots")],
        });
    }

    if errors.is_empty() {
        return Ok(());
    }
    Err(ApiError::Validation(validation_failed(errors)))
}

fn validation_failed(errors: Vec<ValidationIssue>) -> ValidationErrorResponse {
    ValidationErrorResponse {
        status: "error",
        message: "Validation failed",
        errors,
    }
}
