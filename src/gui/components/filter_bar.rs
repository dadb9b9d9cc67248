// src/gui/components/filter_bar.rs
//
// Search box plus one selectable label per category ("전체" first).
// Exactly one label is highlighted: the controller's current category.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("검색");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.search_text)
                .hint_text("이름 (한글/영문)")
                .desired_width(260.0),
        );
        if resp.changed() {
            app.search();
        }
        if !app.search_text.is_empty() && ui.small_button("✕").clicked() {
            app.search_text.clear();
            app.search();
        }
    });

    let buttons = match app.ctl.as_ref() {
        Some(ctl) => ctl.category_buttons(),
        None => return,
    };

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        for b in &buttons {
            if ui.selectable_label(b.active, &b.label).clicked() && !b.active {
                app.select_category(b.filter.key());
            }
        }
    });
}
