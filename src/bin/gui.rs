// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use diy_recipes::{
    config::{consts::{WINDOW_H, WINDOW_W}, AppOptions},
    gui, log,
};
use eframe::egui::ViewportBuilder;

fn main() {
    let opts = match AppOptions::load(None) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let _log_guard = log::init(&opts.log);

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("DIY 레시피")
            .with_inner_size([WINDOW_W, WINDOW_H]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, opts) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
