// src/specs/detail.rs
//
// Item page → image and acquisition source. Only consulted for rows whose
// category table left those blank.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::SOURCE_PATTERNS;
use crate::core::html::{self, css};
use crate::core::sanitize::normalize_ws;

static META_IMAGES: LazyLock<[Selector; 2]> = LazyLock::new(|| {
    [css(r#"meta[property="og:image"]"#), css(r#"meta[name="twitter:image"]"#)]
});

static INFOBOX_IMAGES: LazyLock<[Selector; 5]> = LazyLock::new(|| {
    [
        css(".infobox img"),
        css("table.infobox img"),
        css(".portable-infobox img"),
        css(".pi-image-thumbnail"),
        css("#mw-content-text img"),
    ]
});

static INFOBOX_ROW: LazyLock<Selector> = LazyLock::new(|| css("table.infobox tr"));
static TH: LazyLock<Selector> = LazyLock::new(|| css("th"));
static TD: LazyLock<Selector> = LazyLock::new(|| css("td"));
static PI_ITEM: LazyLock<Selector> = LazyLock::new(|| css(".portable-infobox .pi-item"));
static PI_LABEL: LazyLock<Selector> = LazyLock::new(|| css(".pi-data-label"));
static PI_VALUE: LazyLock<Selector> = LazyLock::new(|| css(".pi-data-value"));

/// What an item page contributes. Empty = not found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detail {
    pub image_url: String,
    pub source_en: String,
}

pub fn parse_doc(doc: &Html) -> Detail {
    Detail {
        image_url: image_from_doc(doc),
        source_en: source_from_doc(doc),
    }
}

/// Social-card meta first, then the infobox picture, then any content image.
pub fn image_from_doc(doc: &Html) -> String {
    for sel in META_IMAGES.iter() {
        if let Some(meta) = doc.select(sel).next() {
            let content = html::attr(meta, "content");
            if !content.is_empty() {
                return html::to_absolute_url(content);
            }
        }
    }

    INFOBOX_IMAGES
        .iter()
        .filter_map(|sel| doc.select(sel).next())
        .find_map(html::img_url)
        .unwrap_or_default()
}

/// Value of the first infobox row whose label looks like "Source"/"Obtained".
pub fn source_from_doc(doc: &Html) -> String {
    let classic = doc.select(&INFOBOX_ROW).filter_map(|row| {
        Some((row.select(&TH).next()?, row.select(&TD).next()?))
    });
    let portable = doc.select(&PI_ITEM).filter_map(|item| {
        Some((item.select(&PI_LABEL).next()?, item.select(&PI_VALUE).next()?))
    });

    classic
        .chain(portable)
        .filter(|(label, _)| is_source_label(&html::text(*label)))
        .map(|(_, value)| normalize_ws(&html::text(value)))
        .find(|v| !v.is_empty() && v != "-")
        .unwrap_or_default()
}

fn is_source_label(label: &str) -> bool {
    let key = label.to_lowercase();
    SOURCE_PATTERNS.iter().any(|p| key.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_image_wins() {
        let doc = Html::parse_document(r#"
            <html><head>
              <meta property="og:image" content="https://dodo.ac/np/images/thumb/1/1a/Bed_NH.png/200px-Bed_NH.png">
              <meta name="twitter:image" content="https://example.com/twitter.png">
            </head><body><table class="infobox"><tr><td><img src="/x.png"></td></tr></table></body></html>
        "#);
        assert_eq!(image_from_doc(&doc), "https://dodo.ac/np/images/1/1a/Bed_NH.png");
    }

    #[test]
    fn infobox_image_fallback() {
        let doc = Html::parse_document(r#"
            <html><body>
              <table class="infobox"><tr><td><img data-src="//dodo.ac/np/images/b/bc/Chair.png"></td></tr></table>
              <div id="mw-content-text"><img src="/other.png"></div>
            </body></html>
        "#);
        assert_eq!(image_from_doc(&doc), "https://dodo.ac/np/images/b/bc/Chair.png");

        let bare = Html::parse_document("<html><body><p>no pictures</p></body></html>");
        assert_eq!(image_from_doc(&bare), "");
    }

    #[test]
    fn classic_infobox_source() {
        let doc = Html::parse_document(r#"
            <html><body><table class="infobox">
              <tr><th>Size</th><td>1x1</td></tr>
              <tr><th>Obtained from</th><td>-</td></tr>
              <tr><th>Recipe source</th><td>  Balloons   (present) </td></tr>
            </table></body></html>
        "#);
        assert_eq!(source_from_doc(&doc), "Balloons (present)");
    }

    #[test]
    fn portable_infobox_source() {
        let doc = Html::parse_document(r#"
            <html><body><aside class="portable-infobox">
              <div class="pi-item"><h3 class="pi-data-label">Sell</h3><div class="pi-data-value">300</div></div>
              <div class="pi-item"><h3 class="pi-data-label">Available from</h3><div class="pi-data-value">Celeste</div></div>
            </aside></body></html>
        "#);
        let got = parse_doc(&doc);
        assert_eq!(got.source_en, "Celeste");
        assert_eq!(got.image_url, "");
    }
}
