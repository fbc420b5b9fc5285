//! Error types shared by the catalog, the calculator and the build ledger.

use thiserror::Error;

/// Errors raised by catalog lookups, rank comparison, aggregation and the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A rank label outside E..S+.
    #[error("unknown skill rank '{0}'")]
    UnknownRank(String),

    /// A character, class or ability name absent from the catalog.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// A loaded record that cannot be used (missing name, unknown skill, ...).
    #[error("malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    /// A selection with more ability slots than a build can hold.
    #[error("a build holds at most 5 abilities, got {0}")]
    TooManyAbilities(usize),

    /// `remove_at` with an index past the end of the ledger.
    #[error("no saved build at index {index} (ledger holds {len})")]
    NoSuchBuild { index: usize, len: usize },
}

impl CalcError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn malformed(kind: &'static str, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            kind,
            index,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoSuchBuild { .. })
    }
}

/// Failure to read or parse one catalog document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{0}' is not a JSON array of records")]
    NotAnArray(String),
}

/// Failure to read the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
