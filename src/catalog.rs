// src/catalog.rs
//
// The catalog: the full, ordered recipe list, loaded once at startup and
// read-only afterwards. Loading does no validation or deduplication; that is
// the quality checker's job (see `check`).

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::net;
use crate::recipe::{Recipe, RecipeId};

#[derive(Debug, Error)]
pub enum LoadError {
    /// The data was addressed as a `file://` URL. Data fetches are blocked in
    /// that context; it has to be served over HTTP (or given as a plain path).
    #[error(
        "로컬 파일(file://)로는 레시피 데이터를 불러올 수 없습니다. \
         로컬 HTTP 서버로 제공해 주세요 (예: `python -m http.server` 후 http://localhost:8000/{file})."
    )]
    BlockedProtocol { file: String },

    #[error("레시피 데이터를 불러오지 못했습니다: {reason}")]
    FetchFailed { reason: String },
}

impl LoadError {
    /// Short machine-readable tag.
    pub fn reason(&self) -> &'static str {
        match self {
            LoadError::BlockedProtocol { .. } => "blocked-protocol",
            LoadError::FetchFailed { .. } => "fetch-failed",
        }
    }
}

/// Where the data file lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Http(String),
    File(String),
    Path(PathBuf),
}

impl CatalogSource {
    pub fn parse(location: &str) -> Self {
        let loc = location.trim();
        let lower = loc.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Http(s!(loc))
        } else if lower.starts_with("file:") {
            CatalogSource::File(s!(loc))
        } else {
            CatalogSource::Path(PathBuf::from(loc))
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self { Self { recipes } }

    pub fn len(&self) -> usize { self.recipes.len() }
    pub fn is_empty(&self) -> bool { self.recipes.is_empty() }

    pub fn recipes(&self) -> &[Recipe] { &self.recipes }
    pub fn get(&self, ix: usize) -> Option<&Recipe> { self.recipes.get(ix) }

    pub fn find(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    /// Parse a data file body. Root must be an array of recipe objects.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let recipes: Vec<Recipe> = serde_json::from_str(text)
            .map_err(|e| LoadError::FetchFailed { reason: format!("JSON: {e}") })?;
        Ok(Self { recipes })
    }

    pub fn load(source: &CatalogSource) -> Result<Self, LoadError> {
        let text = match source {
            CatalogSource::File(url) => {
                let file = url.rsplit('/').next().unwrap_or_default();
                return Err(LoadError::BlockedProtocol { file: s!(file) });
            }
            CatalogSource::Http(url) => {
                // one attempt, no timeout
                net::http_get(&net::agent_untimed(), url)
                    .map_err(|e| LoadError::FetchFailed { reason: e.to_string() })?
            }
            CatalogSource::Path(path) => fs::read_to_string(path)
                .map_err(|e| LoadError::FetchFailed { reason: format!("{}: {e}", path.display()) })?,
        };

        let catalog = Self::from_json(&text)?;
        logf!("Catalog: Loaded {} recipes from {:?}", catalog.len(), source);
        Ok(catalog)
    }
}
