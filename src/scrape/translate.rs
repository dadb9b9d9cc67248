// src/scrape/translate.rs
//
// English → Korean for names, materials and sources.
// Every distinct (whitespace-normalized) string is translated once; the
// results persist in a JSON map between runs so re-scrapes stay cheap.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use serde_json::Value;

use crate::{
    config::consts::TRANSLATE_ENDPOINT,
    core::{
        net::{self, NetError},
        sanitize::normalize_ws,
    },
    file,
};

/// Anything that can turn English text into Korean.
pub trait TranslateBackend {
    fn translate(&self, text: &str) -> Result<String, NetError>;
}

/// The public web translate endpoint (no key).
pub struct GoogleTranslate {
    agent: ureq::Agent,
}

impl GoogleTranslate {
    pub fn new(timeout_secs: u64) -> Self {
        Self { agent: net::agent(timeout_secs) }
    }
}

impl TranslateBackend for GoogleTranslate {
    fn translate(&self, text: &str) -> Result<String, NetError> {
        let payload = net::http_get_json(
            &self.agent,
            TRANSLATE_ENDPOINT,
            &[("client", "gtx"), ("sl", "en"), ("tl", "ko"), ("dt", "t"), ("q", text)],
        )?;
        Ok(join_segments(&payload))
    }
}

/// The endpoint answers `[[["번역", "source", ...], ...], ...]`; the
/// translation is the concatenation of every segment's first element.
pub fn join_segments(payload: &Value) -> String {
    let joined: String = payload
        .get(0)
        .and_then(Value::as_array)
        .map(|parts| {
            parts.iter()
                .filter_map(|p| p.get(0).and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    normalize_ws(&joined)
}

/* ---------- cache ---------- */

#[derive(Debug, Default)]
pub struct TranslationCache {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl TranslationCache {
    /// Missing file → empty cache. An unreadable or corrupt file is logged
    /// and replaced on the next save.
    pub fn load(path: &Path) -> Self {
        let map = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                loge!("Translation cache {} is corrupt, starting empty: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                loge!("Translation cache {} unreadable, starting empty: {e}", path.display());
                BTreeMap::new()
            }
        };
        logd!("Translation cache: {} entries from {}", map.len(), path.display());
        Self { path: path.to_path_buf(), map }
    }

    pub fn in_memory() -> Self { Self::default() }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.map.get(text).map(String::as_str)
    }

    pub fn insert(&mut self, text: String, translated: String) {
        self.map.insert(text, translated);
    }

    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }
    pub fn path(&self) -> &Path { &self.path }

    pub fn save(&self) -> io::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        file::write_json_pretty(&self.path, &self.map)
    }
}

/* ---------- translator ---------- */

pub struct Translator<B: TranslateBackend> {
    backend: B,
    cache: TranslationCache,
    pause: Duration,
}

impl<B: TranslateBackend> Translator<B> {
    pub fn new(backend: B, cache: TranslationCache, pause_ms: u64) -> Self {
        Self { backend, cache, pause: Duration::from_millis(pause_ms) }
    }

    pub fn cache(&self) -> &TranslationCache { &self.cache }

    /// Korean for `text`. Blank in → blank out; any failure yields the
    /// cleaned English text, which is cached like a real answer.
    pub fn to_ko(&mut self, text: &str) -> String {
        let cleaned = normalize_ws(text);
        if cleaned.is_empty() {
            return s!();
        }
        if let Some(hit) = self.cache.get(&cleaned) {
            return s!(hit);
        }

        let result = match self.backend.translate(&cleaned) {
            Ok(t) if !t.is_empty() => t,
            Ok(_) => cleaned.clone(),
            Err(e) => {
                logd!("Translate '{cleaned}' failed: {e}");
                cleaned.clone()
            }
        };
        self.cache.insert(cleaned, result.clone());

        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
        fail: bool,
    }

    impl TranslateBackend for Counting {
        fn translate(&self, text: &str) -> Result<String, NetError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(NetError::Status { code: 429, url: s!(TRANSLATE_ENDPOINT) });
            }
            Ok(format!("ko:{text}"))
        }
    }

    #[test]
    fn cached_after_first_request() {
        let backend = Counting { calls: Cell::new(0), fail: false };
        let mut tr = Translator::new(backend, TranslationCache::in_memory(), 0);

        assert_eq!(tr.to_ko("  Wooden   chair "), "ko:Wooden chair");
        assert_eq!(tr.to_ko("Wooden chair"), "ko:Wooden chair");
        assert_eq!(tr.backend.calls.get(), 1);
        assert_eq!(tr.cache().get("Wooden chair"), Some("ko:Wooden chair"));
    }

    #[test]
    fn blank_is_not_translated() {
        let backend = Counting { calls: Cell::new(0), fail: false };
        let mut tr = Translator::new(backend, TranslationCache::in_memory(), 0);
        assert_eq!(tr.to_ko(" \n "), "");
        assert_eq!(tr.backend.calls.get(), 0);
    }

    #[test]
    fn failure_falls_back_to_english() {
        let backend = Counting { calls: Cell::new(0), fail: true };
        let mut tr = Translator::new(backend, TranslationCache::in_memory(), 0);
        assert_eq!(tr.to_ko("Iron wall rack"), "Iron wall rack");
        assert_eq!(tr.to_ko("Iron wall rack"), "Iron wall rack");
        assert_eq!(tr.backend.calls.get(), 1);
    }

    #[test]
    fn segments_are_concatenated() {
        let payload = serde_json::json!([[["나무 ", "Wooden ", null], ["의자", "chair", null]], null, "en"]);
        assert_eq!(join_segments(&payload), "나무 의자");
        assert_eq!(join_segments(&serde_json::json!({})), "");
    }

    #[test]
    fn cache_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let mut cache = TranslationCache::load(&path);
        assert!(cache.is_empty());
        cache.insert(s!("Log stool"), s!("통나무 스툴"));
        cache.save().unwrap();

        let again = TranslationCache::load(&path);
        assert_eq!(again.get("Log stool"), Some("통나무 스툴"));

        fs::write(&path, "{ not json").unwrap();
        assert!(TranslationCache::load(&path).is_empty());
    }
}
