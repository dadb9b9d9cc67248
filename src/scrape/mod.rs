// src/scrape/mod.rs
mod scrape;
pub mod translate;

pub use scrape::{ build_recipes, collect_rows, fetch_category, fill_from_detail, run, ScrapeError, ScrapeSummary };
