// src/gui/opener.rs
use eframe::egui;

use crate::controller::LinkOpener;

/// Hands links to the platform browser through egui (new tab).
pub struct EguiOpener<'a> {
    pub ctx: &'a egui::Context,
}

impl LinkOpener for EguiOpener<'_> {
    fn open(&mut self, url: &str) {
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
    }
}
