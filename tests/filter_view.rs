// tests/filter_view.rs
//
// Visible subset, counts and category controls over a small catalog.

use std::collections::BTreeSet;

use diy_recipes::{
    catalog::Catalog,
    data::{self, CatalogView, CategoryFilter, Filter, RenderStats},
    recipe::{Recipe, RecipeId},
    store::{self, MemoryStore},
};

fn sample() -> Catalog {
    Catalog::from_json(r#"[
        {"id": "a", "name_en": "Wooden Chair", "name_ko": "나무 의자", "category_en": "Housewares", "category_ko": "하우스웨어"},
        {"id": "b", "name_en": "Stone Axe",    "name_ko": "돌도끼",    "category_en": "Tools",      "category_ko": "도구"},
        {"id": "c", "name_en": "Log Chair",    "name_ko": "통나무 의자", "category_en": "Housewares", "category_ko": "하우스웨어"},
        {"id": "d", "name_en": "Fish Rod",     "category_en": "Tools"},
        {"id": "e", "name_en": "Mystery",      "category_en": "Secret"}
    ]"#).unwrap()
}

fn ids(view: &CatalogView<'_>) -> Vec<String> {
    view.ids().into_iter().map(|id| id.to_string()).collect()
}

fn owned(list: &[&str]) -> BTreeSet<RecipeId> {
    list.iter().map(|s| RecipeId::from(*s)).collect()
}

#[test]
fn default_filter_shows_everything_in_order() {
    let cat = sample();
    let view = CatalogView::build(&cat, &Filter::default());
    assert_eq!(ids(&view), ["a", "b", "c", "d", "e"]);
}

#[test]
fn visible_rows_satisfy_both_predicates() {
    let cat = sample();
    let filter = Filter::new(CategoryFilter::Only("Housewares".into()), "CHAIR");
    let view = CatalogView::build(&cat, &filter);

    let admitted = |r: &Recipe| filter.category.admits(r) && r.name_contains("chair");

    assert_eq!(ids(&view), ["a", "c"]);
    for r in view.iter() {
        assert!(admitted(r));
    }
    let hidden = cat.recipes().iter().filter(|r| !admitted(r)).count();
    assert_eq!(hidden + view.len(), cat.len());
}

#[test]
fn search_hits_either_language() {
    let cat = sample();
    let ko = CatalogView::build(&cat, &Filter::new(CategoryFilter::All, "의자"));
    assert_eq!(ids(&ko), ["a", "c"]);

    let en = CatalogView::build(&cat, &Filter::new(CategoryFilter::All, "rod"));
    assert_eq!(ids(&en), ["d"]);

    let none = CatalogView::build(&cat, &Filter::new(CategoryFilter::All, "zzz"));
    assert!(none.is_empty());
}

#[test]
fn unknown_category_shows_nothing() {
    let cat = sample();
    let view = CatalogView::build(&cat, &Filter::new(CategoryFilter::from_key("Clothing"), ""));
    assert!(view.is_empty());
    assert_eq!(view.stats(&owned(&["a"])), RenderStats { visible: 0, owned: 0 });
}

#[test]
fn owned_count_only_covers_visible_rows() {
    let cat = sample();
    let set = owned(&["a", "b", "ghost"]);

    let all = CatalogView::build(&cat, &Filter::default());
    assert_eq!(all.stats(&set), RenderStats { visible: 5, owned: 2 });

    let tools = CatalogView::build(&cat, &Filter::new(CategoryFilter::Only("Tools".into()), ""));
    let stats = tools.stats(&set);
    assert_eq!(stats, RenderStats { visible: 2, owned: 1 });
    assert!(stats.owned <= stats.visible);
    assert_eq!(stats.to_string(), "표시 2개 | 보유 1개");
}

#[test]
fn rebuild_is_idempotent() {
    let cat = sample();
    let filter = Filter::new(CategoryFilter::Only("Tools".into()), "a");
    let first = data::visible_subset(&cat, &filter);
    let second = data::visible_subset(&cat, &filter);
    assert_eq!(first, second);
}

#[test]
fn category_controls() {
    let cat = sample();
    let buttons = data::category_buttons(&cat, &CategoryFilter::Only("Tools".into()));

    let keys: Vec<&str> = buttons.iter().map(|b| b.filter.key()).collect();
    assert_eq!(keys, ["all", "Housewares", "Tools", "Secret"]);

    let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["전체", "하우스웨어", "도구", "Secret"]);

    let active: Vec<&str> = buttons.iter().filter(|b| b.active).map(|b| b.filter.key()).collect();
    assert_eq!(active, ["Tools"]);
}

const FOOD_AND_DESSERT: &str = r#"[
    {"id": 1, "name_en": "Fish", "category_en": "Food"},
    {"id": 2, "name_en": "Cake", "category_en": "Dessert"}
]"#;

#[test]
fn dessert_only_with_nothing_owned() {
    let cat = Catalog::from_json(FOOD_AND_DESSERT).unwrap();
    let view = CatalogView::build(&cat, &Filter::new(CategoryFilter::from_key("Dessert"), ""));

    assert_eq!(ids(&view), ["2"]);
    assert_eq!(view.stats(&BTreeSet::new()).to_string(), "표시 1개 | 보유 0개");
}

#[test]
fn all_with_numeric_owned_entry() {
    let cat = Catalog::from_json(FOOD_AND_DESSERT).unwrap();
    let backend = MemoryStore::with_entry("owned", "[1,2]");
    let set = store::load_owned(&backend, "owned");

    let view = CatalogView::build(&cat, &Filter::new(CategoryFilter::from_key("all"), ""));
    assert_eq!(ids(&view), ["1", "2"]);
    assert_eq!(view.stats(&set).to_string(), "표시 2개 | 보유 2개");
}
