// src/gui/components/status_line.rs
use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(ctl) = app.ctl.as_ref() else { return };
    ui.horizontal(|ui| {
        ui.label(ctl.stats().to_string());
        if let Some(msg) = app.notice.as_deref() {
            ui.separator();
            ui.colored_label(ui.visuals().warn_fg_color, msg);
        }
    });
}
