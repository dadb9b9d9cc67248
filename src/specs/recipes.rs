// src/specs/recipes.rs
//
// Category page → recipe rows.
//
// A category page carries several tables (navigation boxes, legends, the
// recipe list). The recipe list is the one whose header row scores highest:
//   name/recipe/item +4, materials/ingredients +3, source +2,
//   buy/sell/price +1, ≥5 data rows +2 (any data rows +1).
// Anything under 4 is not a recipe table.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{SpecError, SOURCE_PATTERNS};
use crate::core::html::{self, css};
use crate::core::sanitize::{is_footnote, normalize_ws, unique_keep_order};

static TABLE: LazyLock<Selector> = LazyLock::new(|| css("table"));
static TR: LazyLock<Selector> = LazyLock::new(|| css("tr"));
static TH: LazyLock<Selector> = LazyLock::new(|| css("th"));
static TD: LazyLock<Selector> = LazyLock::new(|| css("td"));
static A: LazyLock<Selector> = LazyLock::new(|| css("a"));
static IMG: LazyLock<Selector> = LazyLock::new(|| css("img"));
static LI: LazyLock<Selector> = LazyLock::new(|| css("li"));

const MIN_SCORE: u32 = 4;

/// One table row as found on the page, English only.
/// Empty strings mean "not on this page"; the scraper may fill image and
/// source from the item's detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeRow {
    pub name_en: String,
    /// Absolute link to the item page, or empty
    pub href: String,
    pub image_url: String,
    pub materials_en: String,
    pub source_en: String,
    pub buy_price: String,
    pub sell_price: String,
}

/// Column positions found in the header row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    pub name: Option<usize>,
    pub materials: Option<usize>,
    pub source: Option<usize>,
    pub buy: Option<usize>,
    pub sell: Option<usize>,
}

pub fn parse_doc(doc: &Html) -> Result<Vec<RecipeRow>, SpecError> {
    let table = find_recipe_table(doc).ok_or(SpecError::NoRecipeTable)?;
    Ok(read_rows(table))
}

/* ---------- table selection ---------- */

pub fn find_recipe_table(doc: &Html) -> Option<ElementRef<'_>> {
    let mut best: Option<(ElementRef<'_>, u32)> = None;
    for table in doc.select(&TABLE) {
        let score = score_table(table);
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((table, score));
        }
    }
    best.filter(|(_, s)| *s >= MIN_SCORE).map(|(t, _)| t)
}

pub fn score_table(table: ElementRef<'_>) -> u32 {
    let headers = header_texts(table);
    if headers.is_empty() {
        return 0;
    }
    let joined = headers.join(" ").to_lowercase();
    let has_any = |keys: &[&str]| keys.iter().any(|k| joined.contains(k));

    let mut score = 0;
    if has_any(&["recipe", "name", "item"]) { score += 4; }
    if has_any(&["materials", "ingredients"]) { score += 3; }
    if has_any(&["source"]) { score += 2; }
    if has_any(&["buy", "sell", "price"]) { score += 1; }

    let data_rows = table.select(&TR).filter(|r| r.select(&TD).next().is_some()).count();
    if data_rows >= 5 {
        score += 2;
    } else if data_rows > 0 {
        score += 1;
    }
    score
}

/// Index of the first `<tr>` holding a `<th>` (within `table.select("tr")`).
fn header_row_index(table: ElementRef<'_>) -> Option<usize> {
    table.select(&TR).position(|r| r.select(&TH).next().is_some())
}

fn header_texts(table: ElementRef<'_>) -> Vec<String> {
    let Some(ix) = header_row_index(table) else { return Vec::new() };
    table
        .select(&TR)
        .nth(ix)
        .map(|row| row.select(&TH).map(html::plain_text).collect())
        .unwrap_or_default()
}

pub fn read_columns(table: ElementRef<'_>) -> Columns {
    let headers: Vec<String> = header_texts(table).into_iter().map(|h| h.to_lowercase()).collect();
    let find = |keys: &[&str]| headers.iter().position(|h| keys.iter().any(|k| h.contains(k)));

    Columns {
        name: find(&["recipe", "name", "item"]),
        materials: find(&["materials", "ingredients"]),
        source: find(SOURCE_PATTERNS),
        buy: find(&["buy"]),
        sell: find(&["sell"]),
    }
}

/* ---------- rows ---------- */

pub fn read_rows(table: ElementRef<'_>) -> Vec<RecipeRow> {
    let cols = read_columns(table);
    let skip = header_row_index(table).map(|ix| ix + 1).unwrap_or(0);

    let mut out = Vec::new();
    for row in table.select(&TR).skip(skip) {
        let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();
        if cells.is_empty() {
            continue;
        }
        if let Some(r) = read_row(row, &cells, &cols) {
            out.push(r);
        }
    }
    out
}

fn read_row(row: ElementRef<'_>, cells: &[ElementRef<'_>], cols: &Columns) -> Option<RecipeRow> {
    let name_cell = *cells.get(cols.name.unwrap_or(0))?;

    // Name cells often hold an icon link first and the name link last.
    let name_link = name_cell.select(&A).last();
    let name_en = html::plain_text(name_link.unwrap_or(name_cell));
    if name_en.is_empty() {
        return None;
    }

    let href = name_link
        .map(|a| html::to_absolute_url(html::attr(a, "href")))
        .unwrap_or_default();

    let image_url = [name_cell, row]
        .into_iter()
        .find_map(|scope| scope.select(&IMG).next().and_then(html::img_url))
        .unwrap_or_default();

    Some(RecipeRow {
        name_en,
        href,
        image_url,
        materials_en: cell_text(cells, cols.materials),
        source_en: source_cell_text(cells, cols.source),
        buy_price: cell_text(cells, cols.buy),
        sell_price: cell_text(cells, cols.sell),
    })
}

/// Visible text, else the sort key / title / aria label.
pub fn cell_text(cells: &[ElementRef<'_>], ix: Option<usize>) -> String {
    let Some(cell) = ix.and_then(|i| cells.get(i)) else { return s!() };
    let txt = html::text(*cell);
    if !txt.is_empty() {
        return txt;
    }
    ["data-sort-value", "title", "aria-label"]
        .iter()
        .map(|a| normalize_ws(html::attr(*cell, a)))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Acquisition cells list several ways to get a recipe, as `<li>` items or
/// line breaks. Join the distinct entries with " / ", minus footnote marks.
pub fn source_cell_text(cells: &[ElementRef<'_>], ix: Option<usize>) -> String {
    let Some(cell) = ix.and_then(|i| cells.get(i)) else { return s!() };

    let items = unique_keep_order(
        cell.select(&LI)
            .map(html::text)
            .filter(|v| !is_footnote(v))
            .collect(),
    );
    if !items.is_empty() {
        return items.join(" / ");
    }

    let lines = unique_keep_order(
        html::text_joined(*cell, "\n")
            .lines()
            .map(normalize_ws)
            .filter(|v| !is_footnote(v))
            .collect(),
    );
    if !lines.is_empty() {
        return lines.join(" / ");
    }

    cell_text(cells, ix)
}
