//! Saved builds for side-by-side comparison. Session-only; indices shift on removal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calc::{aggregate, RankVector, Selection};
use crate::data::CatalogStore;
use crate::error::CalcError;

/// A completed selection and the ranks it needs, frozen at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    pub character: String,
    pub class: String,
    pub abilities: Vec<String>,
    pub requirements: RankVector,
    pub saved_at: DateTime<Utc>,
}

impl BuildSnapshot {
    pub fn capture(selection: &Selection, requirements: RankVector) -> Self {
        BuildSnapshot {
            character: selection.character.clone(),
            class: selection.class_label(),
            abilities: selection.ability_labels(),
            requirements,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildLedger {
    builds: Vec<BuildSnapshot>,
}

impl BuildLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the end; returns the new entry's index.
    pub fn append(&mut self, snapshot: BuildSnapshot) -> usize {
        self.builds.push(snapshot);
        self.builds.len() - 1
    }

    /// Remove one entry; later entries move down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<BuildSnapshot, CalcError> {
        if index >= self.builds.len() {
            return Err(CalcError::NoSuchBuild {
                index,
                len: self.builds.len(),
            });
        }
        Ok(self.builds.remove(index))
    }

    pub fn snapshots(&self) -> &[BuildSnapshot] {
        &self.builds
    }

    pub fn last(&self) -> Option<&BuildSnapshot> {
        self.builds.last()
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

/// Aggregate `selection` and append it. Nothing is appended when aggregation fails.
pub fn save_build(
    catalog: &CatalogStore,
    ledger: &mut BuildLedger,
    selection: &Selection,
) -> Result<usize, CalcError> {
    let requirements = aggregate(catalog, selection)?;
    let index = ledger.append(BuildSnapshot::capture(selection, requirements));
    tracing::info!(index, character = %selection.character, "build saved");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use crate::calc::NONE_SELECTED;

    use super::*;

    fn snapshot(character: &str) -> BuildSnapshot {
        BuildSnapshot::capture(&Selection::new(character), RankVector::default())
    }

    #[test]
    fn remove_on_empty_ledger_is_an_error() {
        let mut ledger = BuildLedger::new();
        assert_eq!(
            ledger.remove_at(0),
            Err(CalcError::NoSuchBuild { index: 0, len: 0 })
        );
    }

    #[test]
    fn removal_shifts_later_entries_down() {
        let mut ledger = BuildLedger::new();
        ledger.append(snapshot("Byleth"));
        ledger.append(snapshot("Edelgard"));
        ledger.append(snapshot("Dimitri"));

        let removed = ledger.remove_at(1).unwrap();
        assert_eq!(removed.character, "Edelgard");
        assert_eq!(ledger.snapshots()[1].character, "Dimitri");
        assert!(ledger.remove_at(2).is_err());
    }

    #[test]
    fn identical_builds_are_kept_separately() {
        let mut ledger = BuildLedger::new();
        let build = snapshot("Claude");
        assert_eq!(ledger.append(build.clone()), 0);
        assert_eq!(ledger.append(build), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn capture_fills_sentinels() {
        let build = snapshot("Claude");
        assert_eq!(build.class, NONE_SELECTED);
        assert!(build.abilities.is_empty());
    }

    #[test]
    fn failed_save_appends_nothing() {
        let catalog = CatalogStore::new();
        let mut ledger = BuildLedger::new();
        let result = save_build(&catalog, &mut ledger, &Selection::new("Byleth"));
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }
}
