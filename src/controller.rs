// src/controller.rs
//
// Interaction controller: the single owner of application state.
//
// Front ends (GUI, CLI) translate their input into the `on_*` calls below and
// draw from `cards()` / `stats()` / `category_buttons()`. Each call runs to
// completion before the next; nothing here is shared across threads.
//
// Re-render policy:
// - search / category change → full rebuild of the visible cards
// - ownership toggle / set   → update the checkboxes for that id, recount;
//                              the visible set does not change

use crate::{
    card::Card,
    catalog::{Catalog, CatalogSource, LoadError},
    data::{self, CatalogView, CategoryButton, CategoryFilter, Filter, RenderStats},
    recipe::RecipeId,
    store::{KeyValueStore, OwnershipStore, StoreError},
};

/// Opens an external reference link in a new browsing context.
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Collects URLs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    pub opened: Vec<String>,
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) {
        self.opened.push(s!(url));
    }
}

pub struct Controller<S: KeyValueStore> {
    catalog: Catalog,
    filter: Filter,
    owned: OwnershipStore<S>,

    // last render output
    row_ix: Vec<usize>,
    cards: Vec<Card>,
    stats: RenderStats,
}

impl<S: KeyValueStore> Controller<S> {
    /// Startup: load the catalog (fatal on failure), read the ownership entry
    /// (never fatal), render with the default filter.
    pub fn start(source: &CatalogSource, backend: S, owned_key: &str) -> Result<Self, LoadError> {
        let catalog = Catalog::load(source).inspect_err(|e| {
            loge!("Startup: Catalog load failed ({}): {}", e.reason(), e);
        })?;
        Ok(Self::with_catalog(catalog, OwnershipStore::load(backend, owned_key)))
    }

    pub fn with_catalog(catalog: Catalog, owned: OwnershipStore<S>) -> Self {
        let mut ctl = Self {
            catalog,
            filter: Filter::default(),
            owned,
            row_ix: Vec::new(),
            cards: Vec::new(),
            stats: RenderStats::default(),
        };
        ctl.render();
        logf!("Init: recipes={}, owned={}", ctl.catalog.len(), ctl.owned.len());
        ctl
    }

    /* ---------- read side ---------- */

    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn filter(&self) -> &Filter { &self.filter }
    pub fn cards(&self) -> &[Card] { &self.cards }
    pub fn stats(&self) -> RenderStats { self.stats }
    pub fn ownership(&self) -> &OwnershipStore<S> { &self.owned }

    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::from_indices(&self.catalog, self.row_ix.clone())
    }

    pub fn category_buttons(&self) -> Vec<CategoryButton> {
        data::category_buttons(&self.catalog, &self.filter.category)
    }

    /* ---------- events ---------- */

    pub fn on_search_input(&mut self, text: &str) {
        if self.filter.search == text {
            return;
        }
        self.filter.search = s!(text);
        logd!("UI: Search → {:?}", text);
        self.render();
    }

    /// Returns false (and changes nothing) for a key that has no control.
    pub fn on_category_click(&mut self, key: &str) -> bool {
        let next = CategoryFilter::from_key(key);
        let known = self.category_buttons().iter().any(|b| b.filter == next);
        if !known {
            logd!("UI: Ignoring unknown category {:?}", key);
            return false;
        }
        logf!("UI: Category {:?} → {:?}", self.filter.category.key(), next.key());
        self.filter.category = next;
        self.render();
        true
    }

    /// Flip ownership and refresh the counts. The checkbox and counts follow
    /// the in-memory state even if persisting fails; the error is returned so
    /// the front end can say so.
    pub fn on_owned_toggle(&mut self, id: &RecipeId) -> Result<bool, StoreError> {
        let result = self.owned.toggle(id);
        self.refresh_owned(id);
        match result {
            Ok(v) => {
                logd!("UI: Owned {id} → {v}");
                Ok(v)
            }
            Err(e) => {
                loge!("Store: Toggle {id} not persisted: {e}");
                Err(e)
            }
        }
    }

    /// Explicit membership. Writes only when it changes.
    pub fn on_owned_set(&mut self, id: &RecipeId, owned: bool) -> Result<(), StoreError> {
        let result = self.owned.set_owned(id, owned);
        self.refresh_owned(id);
        result.inspect_err(|e| loge!("Store: Set {id} → {owned} not persisted: {e}"))
    }

    /// Every card with this id (duplicates included) follows the set.
    fn refresh_owned(&mut self, id: &RecipeId) {
        let now_owned = self.owned.is_owned(id);
        for card in self.cards.iter_mut().filter(|c| &c.id == id) {
            card.owned = now_owned;
        }
        let stats = self.view().stats(self.owned.owned());
        self.stats = stats;
    }

    /// Open the recipe's reference page, if it has one.
    pub fn on_card_activate(&self, id: &RecipeId, opener: &mut dyn LinkOpener) -> Option<String> {
        let url = self.catalog.find(id)?.link()?;
        logd!("UI: Open {id} → {url}");
        opener.open(url);
        Some(s!(url))
    }

    /* ---------- render ---------- */

    /// Full replace: recompute visible rows, cards and counts from current state.
    pub fn render(&mut self) {
        let view = CatalogView::build(&self.catalog, &self.filter);
        let owned = self.owned.owned();
        self.cards = view
            .iter()
            .map(|r| Card::project(r, owned.contains(&r.id)))
            .collect();
        self.stats = view.stats(owned);
        self.row_ix = view.row_ix;
    }
}
