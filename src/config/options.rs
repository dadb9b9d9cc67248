// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub catalog: CatalogOptions,
    pub store: StoreOptions,
    pub log: LogOptions,
    pub scrape: ScrapeOptions,
}

impl AppOptions {
    /// Explicit path: must exist and parse.
    /// No path: use `diy_recipes.toml` from the working directory if there is one,
    /// defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() { Self::from_file(path) } else { Ok(Self::default()) }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Path, `http(s)://` URL, or (rejected) `file://` URL.
    pub location: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self { location: s!(DEFAULT_CATALOG) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub dir: PathBuf,
    pub owned_key: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(STORE_DIR),
            owned_key: s!(OWNED_KEY),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    pub file: PathBuf,
    /// Default filter when RUST_LOG is unset.
    pub level: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from(LOG_FILE),
            level: s!(LOG_LEVEL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub output: PathBuf,
    pub translation_cache: PathBuf,
    pub workers: usize,
    pub request_pause_ms: u64,
    pub detail_pause_ms: u64,
    pub translate_pause_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_CATALOG),
            translation_cache: PathBuf::from(DEFAULT_TRANSLATION_CACHE),
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
            detail_pause_ms: DETAIL_PAUSE_MS,
            translate_pause_ms: TRANSLATE_PAUSE_MS,
            timeout_secs: PAGE_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let opts = AppOptions::from_toml(r#"
            [catalog]
            location = "http://localhost:8000/recipes.json"

            [scrape]
            workers = 2
        "#).unwrap();

        assert_eq!(opts.catalog.location, "http://localhost:8000/recipes.json");
        assert_eq!(opts.scrape.workers, 2);
        assert_eq!(opts.scrape.detail_pause_ms, DETAIL_PAUSE_MS);
        assert_eq!(opts.store, StoreOptions::default());
        assert_eq!(opts.log.level, LOG_LEVEL);
    }

    #[test]
    fn explicit_file_must_exist_and_parse() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        assert!(matches!(AppOptions::load(Some(&missing)), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[store\nowned_key = 1").unwrap();
        assert!(matches!(AppOptions::load(Some(&bad)), Err(ConfigError::Parse { .. })));

        let good = dir.path().join("good.toml");
        fs::write(&good, "[store]\nowned_key = \"mine\"").unwrap();
        assert_eq!(AppOptions::load(Some(&good)).unwrap().store.owned_key, "mine");
    }
}
