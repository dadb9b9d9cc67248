// src/core/html.rs
//
// Small helpers over `scraper` shared by the page specs: text extraction the
// way wiki cells need it, image attribute lookup, and URL normalization for
// links and images found on the wiki.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;
use crate::config::consts::SITE_ROOT;

/// Parse a literal selector. Only ever called with string constants.
pub fn css(literal: &'static str) -> Selector {
    Selector::parse(literal).expect("literal CSS selector")
}

/// Text nodes, each trimmed, empties dropped, joined with `sep`.
pub fn text_joined(el: ElementRef<'_>, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Whitespace-normalized visible text, nodes separated by a space.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&text_joined(el, " "))
}

/// Whitespace-normalized text with nodes concatenated as-is
/// (`Fish<b>ing</b> rod` → `Fishing rod`). Used for names and headers.
pub fn plain_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> &'a str {
    el.value().attr(name).unwrap_or("")
}

/* ---------- images ---------- */

const IMG_SRC_ATTRS: &[&str] = &["data-src", "data-image-src", "data-lazy-src", "src"];
const IMG_SRCSET_ATTRS: &[&str] = &["data-srcset", "srcset"];

/// Absolute image URL of an `<img>`, trying lazy-load attributes first.
pub fn img_url(img: ElementRef<'_>) -> Option<String> {
    for name in IMG_SRC_ATTRS {
        let v = attr(img, name);
        if !v.is_empty() {
            return Some(to_absolute_url(v));
        }
    }
    for name in IMG_SRCSET_ATTRS {
        let v = first_srcset_url(attr(img, name));
        if !v.is_empty() {
            return Some(to_absolute_url(v));
        }
    }
    None
}

/// "url1 1x, url2 2x" → "url1"
pub fn first_srcset_url(value: &str) -> &str {
    let first = value.split(',').next().unwrap_or("").trim();
    first.split(' ').next().unwrap_or("").trim()
}

/* ---------- urls ---------- */

const MEDIA_MARKER: &str = "/media/File:";

static THUMB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://dodo\.ac/np/images)/thumb/([0-9a-f])/([0-9a-f]{2})/([^/]+)/[^/]+$")
        .expect("literal regex")
});

/// Make a wiki href/src absolute.
/// - "//host/x" → "https://host/x"
/// - "/wiki/x"  → "https://nookipedia.com/wiki/x"
/// - media-viewer anchors (`#/media/File:X.png`) → direct file URL
/// - thumbnail URLs → original image URL
pub fn to_absolute_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return s!();
    }
    let abs = if url.starts_with("//") {
        join!("https:", url)
    } else if url.starts_with('/') {
        join!(SITE_ROOT, url)
    } else {
        s!(url)
    };

    if let Some((_, fragment)) = abs.split_once('#') {
        if let Some((_, file)) = fragment.split_once(MEDIA_MARKER) {
            let file = file.trim();
            if !file.is_empty() {
                let decoded = urlencoding::decode(file)
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| s!(file));
                return format!("{SITE_ROOT}/wiki/Special:FilePath/{}", quote_file_name(&decoded));
            }
        }
    }

    normalize_image_url(&abs)
}

/// MediaWiki thumb URL → original image URL.
/// `.../images/thumb/9/98/File.png/64px-File.png` → `.../images/9/98/File.png`
pub fn normalize_image_url(url: &str) -> String {
    THUMB.replace(url, "$1/$2/$3/$4").into_owned()
}

/// Percent-encode a file name, keeping `()_-.,~` and alphanumerics.
fn quote_file_name(name: &str) -> String {
    urlencoding::encode(name)
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2C", ",")
}
