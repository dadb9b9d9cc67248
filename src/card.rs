// src/card.rs
//! Display projection of a recipe.
//!
//! A `Card` is what a front end draws for one visible recipe: every string is
//! already resolved through the fallback rules, so drawing code never has to
//! look at the raw record. Projection is pure and never fails; missing
//! fields become empty strings, placeholders or `None`.

use crate::config::consts::PLACEHOLDER;
use crate::recipe::{Recipe, RecipeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: RecipeId,
    /// `name_ko`, else `name_en`
    pub title: String,
    /// Secondary line: the English name when the title is localized
    pub subtitle: Option<String>,
    pub category: String,
    pub materials: String,
    pub source: String,
    /// Empty when the recipe has no image; front ends show a blank slot.
    pub image_src: String,
    pub link: Option<String>,
    pub buy_price: Option<u64>,
    pub sell_price: Option<u64>,
    /// Checkbox state
    pub owned: bool,
}

impl Card {
    pub fn project(recipe: &Recipe, owned: bool) -> Self {
        let title = first_filled(&[&recipe.name_ko, &recipe.name_en]).unwrap_or_default();
        let subtitle = (!recipe.name_ko.trim().is_empty() && !recipe.name_en.trim().is_empty()
            && recipe.name_ko.trim() != recipe.name_en.trim())
            .then(|| s!(recipe.name_en.trim()));

        Self {
            id: recipe.id.clone(),
            title: s!(title),
            subtitle,
            category: s!(first_filled(&[&recipe.category_ko, &recipe.category_en]).unwrap_or_default()),
            materials: s!(first_filled(&[&recipe.materials_ko, &recipe.materials_en]).unwrap_or(PLACEHOLDER)),
            source: s!(first_filled(&[&recipe.source_ko, &recipe.source_en]).unwrap_or(PLACEHOLDER)),
            image_src: s!(recipe.image_url.trim()),
            link: recipe.link().map(String::from),
            buy_price: recipe.buy_price,
            sell_price: recipe.sell_price,
            owned,
        }
    }

    pub fn has_image(&self) -> bool { !self.image_src.is_empty() }
}

/// First candidate with visible text, trimmed.
fn first_filled<'a>(candidates: &[&'a String]) -> Option<&'a str> {
    candidates.iter().map(|s| s.trim()).find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_fields_win() {
        let mut r = Recipe::new("fish_pie", "Fish pie", "Savory");
        r.name_ko = s!("생선 파이");
        r.category_ko = s!("푸드");
        r.materials_en = s!("3 x Sea bass");
        r.materials_ko = s!("농어 3개");
        let c = Card::project(&r, true);
        assert_eq!(c.title, "생선 파이");
        assert_eq!(c.subtitle.as_deref(), Some("Fish pie"));
        assert_eq!(c.category, "푸드");
        assert_eq!(c.materials, "농어 3개");
        assert!(c.owned);
    }

    #[test]
    fn english_then_placeholder() {
        let mut r = Recipe::new("axe", "Axe", "Tools");
        r.materials_en = s!("Wood x3");
        let c = Card::project(&r, false);
        assert_eq!(c.title, "Axe");
        assert_eq!(c.subtitle, None);
        assert_eq!(c.category, "Tools");
        assert_eq!(c.materials, "Wood x3");
        assert_eq!(c.source, "-");
        assert_eq!(c.link, None);
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut r = Recipe::new("x", "X", "Other");
        r.name_ko = s!("   ");
        r.source_ko = s!(" ");
        r.source_en = s!("Balloons");
        r.source_url = s!("  ");
        let c = Card::project(&r, false);
        assert_eq!(c.title, "X");
        assert_eq!(c.source, "Balloons");
        assert!(c.link.is_none());
    }
}
