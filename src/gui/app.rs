// src/gui/app.rs
use std::error::Error;

use eframe::egui;

use crate::{
    catalog::CatalogSource,
    config::AppOptions,
    controller::Controller,
    recipe::RecipeId,
    store::FileStore,
};

use super::{components, fonts, opener::EguiOpener};

pub fn run(options: eframe::NativeOptions, opts: AppOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "DIY 레시피",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            match fonts::configure(&cc.egui_ctx) {
                Some(path) => logd!("Fonts: using {path}"),
                None => logf!("Fonts: no Hangul font found, Korean text may not render"),
            }
            Ok(Box::new(App::new(&opts)))
        }),
    )?;
    Ok(())
}

pub struct App {
    /// None when the catalog failed to load; the window then only shows `load_error`.
    pub ctl: Option<Controller<FileStore>>,
    pub load_error: Option<String>,

    // search box text (the controller holds the applied filter)
    pub search_text: String,

    // last save failure, shown next to the counts until the next toggle
    pub notice: Option<String>,
}

impl App {
    pub fn new(opts: &AppOptions) -> Self {
        let source = CatalogSource::parse(&opts.catalog.location);
        let store = FileStore::new(&opts.store.dir);

        match Controller::start(&source, store, &opts.store.owned_key) {
            Ok(ctl) => Self {
                search_text: ctl.filter().search.clone(),
                ctl: Some(ctl),
                load_error: None,
                notice: None,
            },
            Err(e) => Self {
                ctl: None,
                load_error: Some(e.to_string()),
                search_text: s!(),
                notice: None,
            },
        }
    }

    /* ---------- event plumbing ---------- */

    pub fn search(&mut self) {
        if let Some(ctl) = self.ctl.as_mut() {
            ctl.on_search_input(&self.search_text);
        }
    }

    pub fn select_category(&mut self, key: &str) {
        if let Some(ctl) = self.ctl.as_mut() {
            ctl.on_category_click(key);
        }
    }

    pub fn toggle_owned(&mut self, id: &RecipeId) {
        let Some(ctl) = self.ctl.as_mut() else { return };
        self.notice = match ctl.on_owned_toggle(id) {
            Ok(_) => None,
            Err(e) => Some(format!("저장 실패: {e}")),
        };
    }

    pub fn activate(&mut self, ctx: &egui::Context, id: &RecipeId) {
        let Some(ctl) = self.ctl.as_ref() else { return };
        let mut opener = EguiOpener { ctx };
        ctl.on_card_activate(id, &mut opener);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(msg) = self.load_error.as_deref() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, msg);
                });
            });
            return;
        }

        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            ui.add_space(4.0);
            components::filter_bar::draw(ui, self);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            components::status_line::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::card_table::draw(ui, self);
        });
    }
}
