// src/recipe.rs
//
// One catalog entry as it appears in the data file.
//
// The file is produced by the scraper but may be edited or regenerated by
// other tools, so the loader is lenient about shapes:
// - `id` may be a string or an integer; both become a string key.
// - optional text fields may be missing, `null` or `""` (all mean "absent").
// - prices may be numbers, numeric strings ("1,200") or junk (→ None).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Join key between the catalog and the ownership store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self { Self(s!(s)) }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self { Self(s) }
}

impl From<u64> for RecipeId {
    fn from(n: u64) -> Self { Self(n.to_string()) }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }
        Ok(match Raw::deserialize(de)? {
            Raw::Text(s) => RecipeId(s),
            Raw::Int(n) => RecipeId(n.to_string()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub name_en: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name_ko: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub category_en: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub category_ko: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub source_url: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub materials_en: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub materials_ko: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub source_en: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub source_ko: String,

    #[serde(default, deserialize_with = "price")]
    pub buy_price: Option<u64>,
    #[serde(default, deserialize_with = "price")]
    pub sell_price: Option<u64>,

    /// Legacy flag from the data file. Ownership lives in the store; this is
    /// carried through for round-tripping and never consulted.
    #[serde(default, deserialize_with = "bool_or_false")]
    pub owned: bool,
}

impl Recipe {
    /// Minimal record; the rest stays empty.
    pub fn new(
        id: impl Into<RecipeId>,
        name_en: &str,
        category_en: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name_en: s!(name_en),
            name_ko: s!(),
            category_en: s!(category_en),
            category_ko: s!(),
            image_url: s!(),
            source_url: s!(),
            materials_en: s!(),
            materials_ko: s!(),
            source_en: s!(),
            source_ko: s!(),
            buy_price: None,
            sell_price: None,
            owned: false,
        }
    }

    /// Search hit on either name, case-insensitive. `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name_ko.to_lowercase().contains(needle)
            || self.name_en.to_lowercase().contains(needle)
    }

    pub fn link(&self) -> Option<&str> {
        let url = self.source_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

fn text_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

fn bool_or_false<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(de)?.unwrap_or(false))
}

fn price<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }
    Ok(match Option::<Raw>::deserialize(de)? {
        None => None,
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Float(f)) if f.is_finite() && f >= 0.0 => Some(f.round() as u64),
        Some(Raw::Float(_)) => None,
        Some(Raw::Text(s)) => parse_price(&s),
    })
}

/// "1,200 Bells" → 1200. Only the first run of digits (with separators) counts.
pub fn parse_price(s: &str) -> Option<u64> {
    let mut digits = s!();
    let mut started = false;
    for ch in s.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            started = true;
        } else if started && ch == ',' {
            continue;
        } else if started {
            break;
        }
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_ids_share_a_key_space() {
        let a: Recipe = serde_json::from_str(r#"{"id": 7, "name_en": "Fish"}"#).unwrap();
        let b: Recipe = serde_json::from_str(r#"{"id": "7", "name_en": "Fish"}"#).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.as_str(), "7");
    }

    #[test]
    fn nulls_and_missing_fields_degrade_to_empty() {
        let r: Recipe = serde_json::from_str(
            r#"{"id": "x", "name_en": "X", "image_url": null, "buy_price": "", "owned": null}"#,
        ).unwrap();
        assert_eq!(r.image_url, "");
        assert_eq!(r.source_url, "");
        assert_eq!(r.buy_price, None);
        assert!(!r.owned);
        assert!(r.link().is_none());
    }

    #[test]
    fn prices_from_text() {
        assert_eq!(parse_price("1,200"), Some(1200));
        assert_eq!(parse_price("2,000 Bells"), Some(2000));
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price(""), None);

        let r: Recipe = serde_json::from_str(
            r#"{"id": "x", "buy_price": 3000, "sell_price": "750"}"#,
        ).unwrap();
        assert_eq!(r.buy_price, Some(3000));
        assert_eq!(r.sell_price, Some(750));
    }
}
