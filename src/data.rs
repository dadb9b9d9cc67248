// src/data.rs
//
// Filter state and the views derived from it.
//
// - Filter: current category + search text (session only, never persisted).
// - CatalogView: zero-copy visible subset, a list of row indexes into the
//                Catalog, in catalog order.
// - RenderStats: visible count and owned-within-visible count.
//
// Everything here is a pure function of (catalog, filter, owned set), so
// rebuilding with unchanged inputs yields the same output.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::Catalog;
use crate::config::consts::CATEGORY_ALL;
use crate::recipe::{Recipe, RecipeId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact `category_en` match.
    Only(String),
}

impl CategoryFilter {
    /// "all" (the sentinel) maps to `All`; anything else is a category key.
    pub fn from_key(key: &str) -> Self {
        if key == CATEGORY_ALL { CategoryFilter::All } else { CategoryFilter::Only(s!(key)) }
    }

    pub fn key(&self) -> &str {
        match self {
            CategoryFilter::All => CATEGORY_ALL,
            CategoryFilter::Only(c) => c,
        }
    }

    #[inline]
    pub fn admits(&self, recipe: &Recipe) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => recipe.category_en == *c,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub category: CategoryFilter,
    pub search: String,
}

impl Filter {
    pub fn new(category: CategoryFilter, search: &str) -> Self {
        Self { category, search: s!(search) }
    }
}

/// Visible subset of a catalog.
#[derive(Clone, Debug)]
pub struct CatalogView<'a> {
    /// Positions of visible rows in the catalog, ascending
    pub row_ix: Vec<usize>,
    raw: &'a Catalog,
}

impl<'a> CatalogView<'a> {
    pub fn build(catalog: &'a Catalog, filter: &Filter) -> Self {
        let needle = filter.search.to_lowercase();
        let row_ix = catalog
            .recipes()
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.category.admits(r))
            .filter(|(_, r)| needle.is_empty() || r.name_contains(&needle))
            .map(|(ix, _)| ix)
            .collect();
        Self { row_ix, raw: catalog }
    }

    /// Build a view directly from precomputed indices.
    pub fn from_indices(catalog: &'a Catalog, row_ix: Vec<usize>) -> Self {
        Self { row_ix, raw: catalog }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &'a Recipe> + '_ {
        let raw = self.raw;
        self.row_ix.iter().filter_map(move |&ix| raw.get(ix))
    }

    pub fn ids(&self) -> Vec<&'a RecipeId> {
        self.iter().map(|r| &r.id).collect()
    }

    pub fn stats(&self, owned: &BTreeSet<RecipeId>) -> RenderStats {
        RenderStats::compute(self.iter(), owned)
    }
}

/// Free-function form of `CatalogView::build`, returning borrowed recipes.
pub fn visible_subset<'a>(catalog: &'a Catalog, filter: &Filter) -> Vec<&'a Recipe> {
    CatalogView::build(catalog, filter).iter().collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub visible: usize,
    pub owned: usize,
}

impl RenderStats {
    pub fn compute<'r>(
        visible: impl IntoIterator<Item = &'r Recipe>,
        owned: &BTreeSet<RecipeId>,
    ) -> Self {
        let mut stats = RenderStats::default();
        for r in visible {
            stats.visible += 1;
            if owned.contains(&r.id) {
                stats.owned += 1;
            }
        }
        stats
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "표시 {}개 | 보유 {}개", self.visible, self.owned)
    }
}

/// One category control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryButton {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

/// `All` first, then each distinct `category_en` in first-seen order.
/// Labels use `category_ko`, falling back to the English key.
pub fn category_buttons(catalog: &Catalog, current: &CategoryFilter) -> Vec<CategoryButton> {
    let mut out = vec![CategoryButton {
        filter: CategoryFilter::All,
        label: s!("전체"),
        active: *current == CategoryFilter::All,
    }];

    for r in catalog.recipes() {
        if r.category_en.is_empty() {
            continue;
        }
        if out.iter().any(|b| b.filter.key() == r.category_en && b.filter != CategoryFilter::All) {
            continue;
        }
        let filter = CategoryFilter::Only(r.category_en.clone());
        let label = if r.category_ko.trim().is_empty() { r.category_en.clone() } else { r.category_ko.clone() };
        out.push(CategoryButton { active: *current == filter, filter, label });
    }
    out
}
