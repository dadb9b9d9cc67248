// src/gui/components/mod.rs
pub mod card_table;
pub mod filter_bar;
pub mod status_line;
