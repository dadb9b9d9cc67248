// src/core/sanitize.rs

use std::collections::HashSet;

/// Collapse runs of whitespace to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "Fish & Chips" → "fish_chips". Apostrophes vanish; every other run of
/// non [a-z0-9] becomes one underscore.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase().replace('\'', "");
    let mut out = String::with_capacity(lower.len());
    let mut last_us = false;
    for ch in lower.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Footnote markers like "[1]" or "[12]".
pub fn is_footnote(s: &str) -> bool {
    s.len() > 2
        && s.starts_with('[')
        && s.ends_with(']')
        && s[1..s.len() - 1].chars().all(|c| c.is_ascii_digit())
}

/// Drop empties and repeats, keep first-seen order.
pub fn unique_keep_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}
