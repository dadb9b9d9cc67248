// src/check.rs
//
// Data-file quality report. Works on raw JSON rather than `Recipe` so that
// shape problems (wrong types, missing keys) are reported instead of being
// smoothed over by the lenient loader.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

pub const REQUIRED_KEYS: &[&str] = &[
    "id", "name_en", "name_ko", "category_en", "category_ko", "source_url", "owned",
];

/// Keys whose empty-value ratio is reported.
pub const TEXT_KEYS: &[&str] = &[
    "id", "name_en", "name_ko", "category_en", "category_ko", "image_url", "source_url",
    "materials_en", "materials_ko", "source_en", "source_ko", "buy_price", "sell_price",
];

const LIST_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("파일이 없습니다: {0}")]
    Missing(PathBuf),

    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid JSON in {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("루트 타입이 배열이 아닙니다.")]
    NotArray,

    #[error("{0}번 항목이 객체가 아닙니다.")]
    NotObject(usize),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    pub file: PathBuf,
    pub total: usize,
    /// category_en (or "(empty)") → count, sorted by name
    pub categories: BTreeMap<String, usize>,
    /// key → records where it is missing, null or blank
    pub empty: BTreeMap<&'static str, usize>,
    pub duplicate_ids: Vec<String>,
    /// key → "index=N" of every record lacking it
    pub missing_keys: BTreeMap<&'static str, Vec<String>>,
    pub duplicate_names: Vec<String>,
    pub invalid_source_urls: Vec<String>,
    pub invalid_image_urls: Vec<String>,
    pub type_errors: Vec<String>,
}

impl Report {
    /// Duplicate ids, missing keys, bad reference links and type errors fail
    /// the check; duplicate names and bad image links are warnings.
    pub fn has_error(&self) -> bool {
        !self.duplicate_ids.is_empty()
            || !self.missing_keys.is_empty()
            || !self.invalid_source_urls.is_empty()
            || !self.type_errors.is_empty()
    }
}

pub fn check_file(path: &Path) -> Result<Report, CheckError> {
    if !path.exists() {
        return Err(CheckError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|source| CheckError::Read { path: path.to_path_buf(), source })?;
    let payload: Value = serde_json::from_str(&text)
        .map_err(|source| CheckError::Json { path: path.to_path_buf(), source })?;

    let mut report = check_value(&payload)?;
    report.file = path.to_path_buf();
    Ok(report)
}

pub fn check_value(payload: &Value) -> Result<Report, CheckError> {
    let items = payload.as_array().ok_or(CheckError::NotArray)?;
    let records: Vec<&Map<String, Value>> = items
        .iter()
        .enumerate()
        .map(|(i, v)| v.as_object().ok_or(CheckError::NotObject(i)))
        .collect::<Result<_, _>>()?;

    let mut report = Report { total: records.len(), ..Default::default() };
    let mut ids: HashMap<String, usize> = HashMap::new();
    let mut names: HashMap<String, usize> = HashMap::new();

    for (idx, item) in records.iter().enumerate() {
        let id = item.get("id").map(scalar_text).unwrap_or_default();
        if !id.is_empty() {
            *ids.entry(id).or_default() += 1;
        }

        let name = item.get("name_en").map(scalar_text).unwrap_or_default();
        if !name.is_empty() {
            *names.entry(name).or_default() += 1;
        }

        let category = item.get("category_en").map(scalar_text).unwrap_or_default();
        let category = if category.is_empty() { s!("(empty)") } else { category };
        *report.categories.entry(category).or_default() += 1;

        for key in REQUIRED_KEYS {
            if !item.contains_key(*key) {
                report.missing_keys.entry(*key).or_default().push(format!("index={idx}"));
            }
        }

        for key in TEXT_KEYS {
            let value = item.get(*key).unwrap_or(&Value::Null);
            if !type_ok(key, value) {
                report.type_errors.push(format!("index={idx} key={key} type={}", type_name(value)));
                continue;
            }
            if scalar_text(value).is_empty() {
                *report.empty.entry(*key).or_default() += 1;
            }
        }

        match item.get("owned") {
            Some(Value::Bool(_)) | None => {}
            Some(other) => report
                .type_errors
                .push(format!("index={idx} key=owned type={}", type_name(other))),
        }

        for (key, bucket) in [
            ("source_url", &mut report.invalid_source_urls),
            ("image_url", &mut report.invalid_image_urls),
        ] {
            if let Some(Value::String(url)) = item.get(key) {
                if !url.trim().is_empty() && !is_valid_http_url(url) {
                    bucket.push(format!("index={idx} value={url}"));
                }
            }
        }
    }

    report.duplicate_ids = repeated(ids);
    report.duplicate_names = repeated(names);
    Ok(report)
}

/// Absolute http(s) URL with a host.
pub fn is_valid_http_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

fn type_ok(key: &str, value: &Value) -> bool {
    match key {
        "id" => matches!(value, Value::String(_) | Value::Number(_) | Value::Null),
        "buy_price" | "sell_price" => matches!(value, Value::String(_) | Value::Number(_) | Value::Null),
        _ => matches!(value, Value::String(_) | Value::Null),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s!(s.trim()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => s!(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn repeated(counts: HashMap<String, usize>) -> Vec<String> {
    let mut out: Vec<String> = counts.into_iter().filter(|(_, n)| *n > 1).map(|(k, _)| k).collect();
    out.sort();
    out
}

fn pct(n: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { n as f64 / total as f64 * 100.0 }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, values: &[String]) -> fmt::Result {
    writeln!(f, "\n[{title}]")?;
    if values.is_empty() {
        return writeln!(f, "  - 없음");
    }
    for v in values.iter().take(LIST_LIMIT) {
        writeln!(f, "  - {v}")?;
    }
    if values.len() > LIST_LIMIT {
        writeln!(f, "  ... 외 {}개", values.len() - LIST_LIMIT)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[요약] 파일: {}", self.file.display())?;
        writeln!(f, "[요약] 전체 레코드 수: {}", self.total)?;

        writeln!(f, "\n[카테고리 분포]")?;
        for (category, count) in &self.categories {
            writeln!(f, "  - {category}: {count}개 ({:.1}%)", pct(*count, self.total))?;
        }

        writeln!(f, "\n[빈 문자열 비율]")?;
        for key in TEXT_KEYS {
            let n = self.empty.get(key).copied().unwrap_or(0);
            writeln!(f, "  - {key}: {n}/{} ({:.1}%)", self.total, pct(n, self.total))?;
        }

        write_list(f, "중복 ID", &self.duplicate_ids)?;

        writeln!(f, "\n[필수 키 누락]")?;
        if self.missing_keys.is_empty() {
            writeln!(f, "  - 없음")?;
        }
        for key in REQUIRED_KEYS {
            if let Some(rows) = self.missing_keys.get(key) {
                let first = rows.first().map(String::as_str).unwrap_or("");
                writeln!(f, "  - {key}: {}건 (예: {first})", rows.len())?;
            }
        }

        write_list(f, "중복 영문 이름(name_en)", &self.duplicate_names)?;
        write_list(f, "잘못된 source_url", &self.invalid_source_urls)?;
        write_list(f, "잘못된 image_url", &self.invalid_image_urls)?;
        write_list(f, "타입 오류", &self.type_errors)?;

        write!(f, "\n[결과] {}", if self.has_error() { "FAIL" } else { "PASS" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good(id: &str, name: &str) -> Value {
        json!({
            "id": id, "name_en": name, "name_ko": "이름",
            "category_en": "Tools", "category_ko": "도구",
            "source_url": "https://nookipedia.com/wiki/X", "image_url": "",
            "buy_price": null, "sell_price": "200", "owned": false
        })
    }

    #[test]
    fn clean_file_passes() {
        let report = check_value(&json!([good("a", "A"), good("b", "B")])).unwrap();
        assert!(!report.has_error());
        assert_eq!(report.categories.get("Tools"), Some(&2));
        assert_eq!(report.empty.get("image_url"), Some(&2));
        assert_eq!(report.empty.get("buy_price"), Some(&2));
        assert!(report.to_string().ends_with("[결과] PASS"));
    }

    #[test]
    fn duplicate_ids_fail_duplicate_names_warn() {
        let report = check_value(&json!([good("a", "A"), good("a", "B")])).unwrap();
        assert_eq!(report.duplicate_ids, vec![s!("a")]);
        assert!(report.has_error());

        let report = check_value(&json!([good("a", "Same"), good("b", "Same")])).unwrap();
        assert_eq!(report.duplicate_names, vec![s!("Same")]);
        assert!(!report.has_error());
    }

    #[test]
    fn missing_keys_and_types() {
        let mut broken = good("c", "C");
        broken.as_object_mut().unwrap().remove("owned");
        broken["name_ko"] = json!(5);
        let report = check_value(&json!([good("a", "A"), broken])).unwrap();

        assert_eq!(report.missing_keys.get("owned"), Some(&vec![s!("index=1")]));
        assert_eq!(report.type_errors, vec![s!("index=1 key=name_ko type=number")]);
        assert!(report.has_error());
    }

    #[test]
    fn urls() {
        assert!(is_valid_http_url("https://nookipedia.com/wiki/X"));
        assert!(!is_valid_http_url("ftp://host/x"));
        assert!(!is_valid_http_url("/wiki/X"));

        let mut bad_image = good("a", "A");
        bad_image["image_url"] = json!("images/a.png");
        let report = check_value(&json!([bad_image])).unwrap();
        assert_eq!(report.invalid_image_urls.len(), 1);
        assert!(!report.has_error(), "bad image links only warn");

        let mut bad_link = good("a", "A");
        bad_link["source_url"] = json!("nookipedia.com/wiki/X");
        assert!(check_value(&json!([bad_link])).unwrap().has_error());
    }

    #[test]
    fn root_must_be_array_of_objects() {
        assert!(matches!(check_value(&json!({"id": 1})), Err(CheckError::NotArray)));
        assert!(matches!(check_value(&json!([good("a", "A"), 3])), Err(CheckError::NotObject(1))));
    }
}
