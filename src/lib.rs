// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod specs;

pub mod recipe;
pub mod catalog;
pub mod data;
pub mod card;
pub mod store;
pub mod controller;

pub mod check;
pub mod file;
pub mod progress;
pub mod scrape;

pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;
