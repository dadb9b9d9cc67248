// src/gui/components/card_table.rs
//
// One row per visible card. Clicking the checkbox toggles ownership;
// double-clicking anywhere else on the row opens the reference page.
// Events are collected while drawing and applied after the table so the
// controller is never borrowed twice.

use eframe::egui::{self, RichText, Sense, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::{card::Card, config::consts::PLACEHOLDER, gui::app::App, recipe::RecipeId};

const ROW_H: f32 = 56.0;
const THUMB: f32 = 48.0;

enum RowEvent {
    Toggle(RecipeId),
    Open(RecipeId),
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(ctl) = app.ctl.as_ref() else { return };
    let cards = ctl.cards();

    if cards.is_empty() {
        ui.add_space(16.0);
        ui.vertical_centered(|ui| ui.weak("조건에 맞는 레시피가 없습니다."));
        return;
    }

    let mut events: Vec<RowEvent> = Vec::new();

    TableBuilder::new(ui)
        .striped(true)
        .sense(Sense::click())
        .column(Column::exact(THUMB + 8.0))
        .column(Column::initial(200.0).at_least(120.0).clip(true))
        .column(Column::initial(90.0).clip(true))
        .column(Column::initial(260.0).resizable(true).clip(true))
        .column(Column::initial(200.0).resizable(true).clip(true))
        .column(Column::initial(110.0))
        .column(Column::remainder().at_least(48.0))
        .header(22.0, |mut header| {
            for title in ["", "이름", "분류", "재료", "획득 방법", "구매 / 판매", "보유"] {
                header.col(|ui| { ui.strong(title); });
            }
        })
        .body(|body| {
            body.rows(ROW_H, cards.len(), |mut row| {
                let card = &cards[row.index()];

                row.col(|ui| thumbnail(ui, card));
                row.col(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&card.title).strong());
                        if let Some(sub) = &card.subtitle {
                            ui.weak(sub);
                        }
                    });
                });
                row.col(|ui| { ui.label(&card.category); });
                row.col(|ui| { ui.label(&card.materials); });
                row.col(|ui| { ui.label(&card.source); });
                row.col(|ui| { ui.label(prices(card)); });
                row.col(|ui| {
                    let mut owned = card.owned;
                    if ui.checkbox(&mut owned, "").changed() {
                        events.push(RowEvent::Toggle(card.id.clone()));
                    }
                });

                let mut resp = row.response();
                if card.link.is_some() {
                    resp = resp.on_hover_cursor(egui::CursorIcon::PointingHand);
                }
                if resp.double_clicked() {
                    events.push(RowEvent::Open(card.id.clone()));
                }
            });
        });

    let ctx = ui.ctx().clone();
    for ev in events {
        match ev {
            RowEvent::Toggle(id) => app.toggle_owned(&id),
            RowEvent::Open(id) => app.activate(&ctx, &id),
        }
    }
}

/// Blank slot when there is no image.
fn thumbnail(ui: &mut egui::Ui, card: &Card) {
    let size = Vec2::splat(THUMB);
    if card.has_image() {
        ui.add(egui::Image::new(card.image_src.as_str()).fit_to_exact_size(size));
    } else {
        ui.allocate_space(size);
    }
}

fn prices(card: &Card) -> String {
    let fmt = |p: Option<u64>| p.map(|v| v.to_string()).unwrap_or_else(|| s!(PLACEHOLDER));
    format!("{} / {}", fmt(card.buy_price), fmt(card.sell_price))
}
