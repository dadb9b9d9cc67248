// src/specs/mod.rs
//! # Page specs
//!
//! Pure HTML readers for the wiki pages the scraper visits. Each reader takes a
//! parsed document and returns plain data; nothing here touches the network,
//! the translation cache or the output file (see `scrape` for that).
//!
//! - `recipes` – one "DIY recipes/<Category>" page: pick the recipe table by
//!   scoring its header, map header names to columns, read each row.
//! - `detail` – an item's own page: image and acquisition source from the
//!   infobox, used when the category table leaves them blank.
//!
//! Header matching is substring-based and case-insensitive. Empty cells fall
//! back to their sort key or title.
//!
//! Readers are tested offline against small inline fixtures.

use thiserror::Error;

pub mod detail;
pub mod recipes;

/// Header keywords that mark the acquisition-method column / infobox row.
pub const SOURCE_PATTERNS: &[&str] = &[
    "source",
    "obtain",
    "obtained",
    "how to obtain",
    "obtain method",
    "recipe source",
    "available from",
    "available",
];

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("recipe table not found")]
    NoRecipeTable,
}
