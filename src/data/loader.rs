//! Load the three catalog documents (JSON arrays of records) into a CatalogStore.
//! The three reads are independent; a failed read leaves its table empty.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::data::ability::{Ability, DEFAULT_ABILITIES_FILE};
use crate::data::catalog::{CatalogRecord, CatalogStore};
use crate::data::character::{Character, DEFAULT_CHARACTERS_FILE};
use crate::data::combat_class::{CombatClass, DEFAULT_CLASSES_FILE};
use crate::error::{CalcError, LoadError};

pub const DEFAULT_DATA_DIR: &str = "data";

/// Records parsed from one document plus the entries that had to be skipped.
#[derive(Debug, Clone)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub skipped: Vec<CalcError>,
}

/// Parse a JSON array document, skipping entries that are not usable records.
pub fn parse_records<T: CatalogRecord>(raw: &str, path: &str) -> Result<ParsedRecords<T>, LoadError> {
    let payload: Value = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })?;
    let Value::Array(entries) = payload else {
        return Err(LoadError::NotAnArray(path.to_string()));
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match parse_record::<T>(index, entry) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(path, "skipping record: {err}");
                skipped.push(err);
            }
        }
    }

    Ok(ParsedRecords { records, skipped })
}

fn parse_record<T: CatalogRecord>(index: usize, entry: Value) -> Result<T, CalcError> {
    let record: T = serde_json::from_value(entry)
        .map_err(|err| CalcError::malformed(T::KIND, index, err.to_string()))?;
    if record.name().trim().is_empty() {
        return Err(CalcError::malformed(T::KIND, index, "missing non-empty 'name'"));
    }
    Ok(record)
}

/// Read and parse one document.
pub async fn fetch_records<T: CatalogRecord>(path: PathBuf) -> Result<ParsedRecords<T>, LoadError> {
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
    parse_records(&raw, &display)
}

fn records_or_empty<T: CatalogRecord>(result: Result<ParsedRecords<T>, LoadError>) -> Vec<T> {
    match result {
        Ok(parsed) => parsed.records,
        Err(err) => {
            tracing::error!(kind = T::KIND, "catalog load failed: {err}");
            Vec::new()
        }
    }
}

/// Load characters, classes and abilities from `data_dir` concurrently.
pub async fn load_catalog(data_dir: &Path) -> CatalogStore {
    let (characters, classes, abilities) = tokio::join!(
        fetch_records::<Character>(data_dir.join(DEFAULT_CHARACTERS_FILE)),
        fetch_records::<CombatClass>(data_dir.join(DEFAULT_CLASSES_FILE)),
        fetch_records::<Ability>(data_dir.join(DEFAULT_ABILITIES_FILE)),
    );

    let mut store = CatalogStore::new();
    let characters = store.load_characters(records_or_empty(characters));
    let classes = store.load_classes(records_or_empty(classes));
    let abilities = store.load_abilities(records_or_empty(abilities));
    tracing::info!(
        data_dir = %data_dir.display(),
        characters,
        classes,
        abilities,
        "catalog loaded"
    );
    store
}

/// Blocking wrapper for callers outside a runtime (CLI).
pub fn load_catalog_blocking(data_dir: &Path) -> std::io::Result<CatalogStore> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(load_catalog(data_dir)))
}
