// src/gui/fonts.rs
//
// egui ships Latin glyphs only. Recipe names are Korean, so pull in the first
// CJK-capable system font we can find and put it in front of both families.

use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const FONT_KEY: &str = "hangul_fallback";

const CANDIDATES: &[&str] = &[
    r"C:\Windows\Fonts\malgun.ttf",
    r"C:\Windows\Fonts\gulim.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Returns the font path that was installed, if any.
pub fn configure(ctx: &egui::Context) -> Option<&'static str> {
    let (path, data) = CANDIDATES
        .iter()
        .find_map(|p| std::fs::read(p).ok().map(|d| (*p, d)))?;

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(s!(FONT_KEY), Arc::new(FontData::from_owned(data)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().insert(0, s!(FONT_KEY));
    }
    ctx.set_fonts(fonts);
    Some(path)
}
