//! Runtime configuration: defaults, then an optional YAML file, then environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::loader::DEFAULT_DATA_DIR;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "skillcalc.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";
pub const DEFAULT_LOG_FILTER: &str = "skillcalc=info,tower_http=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub frontend_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration the binary runs with. `SKILLCALC_CONFIG` names the YAML
    /// file; without it `skillcalc.yaml` is used when present.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("SKILLCALC_CONFIG") {
            Ok(path) => Self::from_yaml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_yaml_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml_str(&raw, &display)
    }

    pub fn from_yaml_str(raw: &str, path: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("SKILLCALC_BIND") {
            self.bind_addr = bind;
        }
        if let Some(dir) = lookup("SKILLCALC_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("SKILLCALC_FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn yaml_overrides_only_listed_fields() {
        let config =
            AppConfig::from_yaml_str("bind_addr: 0.0.0.0:8080\ndata_dir: /srv/fe3h\n", "test.yaml")
                .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("/srv/fe3h"));
        assert_eq!(config.frontend_dir, PathBuf::from(DEFAULT_FRONTEND_DIR));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(AppConfig::from_yaml_str("", "empty.yaml").unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = AppConfig::from_yaml_str("bind_addr: [1, 2", "bad.yaml").unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn env_wins_over_file() {
        let env: HashMap<&str, &str> = [("SKILLCALC_BIND", "127.0.0.1:9000")].into_iter().collect();
        let mut config = AppConfig::from_yaml_str("bind_addr: 0.0.0.0:8080\n", "test.yaml").unwrap();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
