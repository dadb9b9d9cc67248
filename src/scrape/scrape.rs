// src/scrape/scrape.rs
use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    thread,
    time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }},
};

use scraper::Html;
use thiserror::Error;

use crate::{
    config::{ consts::{ CategorySource, TRANSLATE_TIMEOUT_SECS }, options::ScrapeOptions },
    core::{ net::{ self, NetError }, sanitize::slugify },
    file,
    progress::Progress,
    recipe::{ parse_price, Recipe, RecipeId },
    specs::{ detail::{ self, Detail }, recipes::{ self, RecipeRow }, SpecError },
};

use super::translate::{ GoogleTranslate, TranslateBackend, TranslationCache, Translator };

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{category}: {source}")]
    Fetch { category: String, source: NetError },

    #[error("{category}: {source} ({url})")]
    Parse { category: String, url: String, source: SpecError },

    #[error("workers stopped before {category} was reported")]
    Lost { category: String },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub recipes: usize,
    pub output: PathBuf,
    pub translations: usize,
}

/// Scrape every category, translate, write the data file and the cache.
/// Any failing category aborts the run before anything is written.
pub fn run(
    opts: &ScrapeOptions,
    sources: &'static [CategorySource],
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeSummary, ScrapeError> {
    let cache = TranslationCache::load(&opts.translation_cache);
    let mut translator = Translator::new(
        GoogleTranslate::new(TRANSLATE_TIMEOUT_SECS),
        cache,
        opts.translate_pause_ms,
    );

    let per_category = collect_rows(opts, sources, progress.as_deref_mut())?;

    let mut all = Vec::new();
    for (source, rows) in sources.iter().zip(per_category) {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("[번역] {} ({}개)", source.category_ko, rows.len()));
        }
        all.extend(build_recipes(source, rows, &mut translator));
    }

    translator.cache().save().map_err(|source| ScrapeError::Write {
        path: translator.cache().path().to_path_buf(),
        source,
    })?;
    file::write_json_pretty(&opts.output, &all)
        .map_err(|source| ScrapeError::Write { path: opts.output.clone(), source })?;

    logf!("Scrape done: {} recipes → {}", all.len(), opts.output.display());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("완료: {}", opts.output.display()));
        p.finish();
    }

    Ok(ScrapeSummary {
        recipes: all.len(),
        output: opts.output.clone(),
        translations: translator.cache().len(),
    })
}

/// Fetch and parse every category page on a small worker pool.
/// Rows come back in `sources` order.
pub fn collect_rows(
    opts: &ScrapeOptions,
    sources: &'static [CategorySource],
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<Vec<RecipeRow>>, ScrapeError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(sources.len());
    }

    type FetchOk = (usize, Vec<RecipeRow>);
    type FetchErr = (usize, ScrapeError);

    let agent = net::agent(opts.timeout_secs);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = opts.workers.min(sources.len()).max(1);
    let request_pause = Duration::from_millis(opts.request_pause_ms);
    let detail_pause = Duration::from_millis(opts.detail_pause_ms);

    for _ in 0..workers {
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let agent = agent.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= sources.len() {
                    break;
                }
                let result = match fetch_category(&agent, &sources[i], detail_pause) {
                    Ok(rows) => Ok((i, rows)),
                    Err(e) => Err((i, e)),
                };
                let _ = tx.send(result);
                thread::sleep(request_pause); // be polite
            }
        });
    }
    drop(res_tx);

    let mut slots: Vec<Option<Vec<RecipeRow>>> = (0..sources.len()).map(|_| None).collect();
    let mut first_err: Option<(usize, ScrapeError)> = None;

    for _ in 0..sources.len() {
        match res_rx.recv() {
            Ok(Ok((i, rows))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(sources[i].category_ko, rows.len());
                }
                logf!("{}: {} rows", sources[i].category_en, rows.len());
                slots[i] = Some(rows);
            }
            Ok(Err((i, e))) => {
                loge!("{e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(sources[i].category_ko, &e.to_string());
                }
                if first_err.as_ref().is_none_or(|(j, _)| i < *j) {
                    first_err = Some((i, e));
                }
            }
            Err(_) => break, // workers ended early
        }
    }

    if let Some((_, e)) = first_err {
        return Err(e);
    }

    slots.into_iter()
        .zip(sources)
        .map(|(rows, src)| rows.ok_or_else(|| ScrapeError::Lost { category: s!(src.category_en) }))
        .collect()
}

/// One category page, with blanks filled from item pages.
pub fn fetch_category(
    agent: &ureq::Agent,
    source: &CategorySource,
    detail_pause: Duration,
) -> Result<Vec<RecipeRow>, ScrapeError> {
    logd!("Fetching {}", source.url);
    let body = net::http_get(agent, source.url)
        .map_err(|e| ScrapeError::Fetch { category: s!(source.category_en), source: e })?;

    let mut rows = {
        let doc = Html::parse_document(&body);
        recipes::parse_doc(&doc).map_err(|e| ScrapeError::Parse {
            category: s!(source.category_en),
            url: s!(source.url),
            source: e,
        })?
    };

    let mut details: HashMap<String, Option<Detail>> = HashMap::new();
    for row in rows.iter_mut() {
        let needs_detail = row.image_url.is_empty() || row.source_en.is_empty();
        if !needs_detail || row.href.is_empty() {
            continue;
        }
        let found = details
            .entry(row.href.clone())
            .or_insert_with(|| fetch_detail(agent, &row.href, detail_pause));
        if let Some(d) = found {
            fill_from_detail(row, d);
        }
    }
    Ok(rows)
}

/// Item pages are optional; a failed fetch just leaves the blanks.
fn fetch_detail(agent: &ureq::Agent, url: &str, pause: Duration) -> Option<Detail> {
    match net::http_get(agent, url) {
        Ok(body) => {
            let d = detail::parse_doc(&Html::parse_document(&body));
            thread::sleep(pause);
            Some(d)
        }
        Err(e) => {
            logd!("Detail page skipped: {e}");
            None
        }
    }
}

pub fn fill_from_detail(row: &mut RecipeRow, d: &Detail) {
    if row.image_url.is_empty() {
        row.image_url = d.image_url.clone();
    }
    if row.source_en.is_empty() {
        row.source_en = d.source_en.clone();
    }
}

/// Parsed rows → catalog records (Korean fields translated).
pub fn build_recipes<B: TranslateBackend>(
    source: &CategorySource,
    rows: Vec<RecipeRow>,
    translator: &mut Translator<B>,
) -> Vec<Recipe> {
    rows.into_iter()
        .map(|row| {
            let mut r = Recipe::new(RecipeId::new(slugify(&row.name_en)), &row.name_en, source.category_en);
            r.name_ko = translator.to_ko(&row.name_en);
            r.category_ko = s!(source.category_ko);
            r.image_url = row.image_url;
            r.source_url = if row.href.is_empty() { s!(source.url) } else { row.href };
            r.materials_ko = translator.to_ko(&row.materials_en);
            r.materials_en = row.materials_en;
            r.source_ko = translator.to_ko(&row.source_en);
            r.source_en = row.source_en;
            r.buy_price = parse_price(&row.buy_price);
            r.sell_price = parse_price(&row.sell_price);
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Prefix;
    impl TranslateBackend for Prefix {
        fn translate(&self, text: &str) -> Result<String, NetError> {
            Ok(format!("ko:{text}"))
        }
    }

    const TOOLS: CategorySource = CategorySource {
        category_en: "Tools",
        category_ko: "도구",
        url: "https://nookipedia.com/wiki/DIY_recipes/Tools",
    };

    fn row(name: &str, href: &str) -> RecipeRow {
        RecipeRow {
            name_en: s!(name),
            href: s!(href),
            materials_en: s!("5x Tree branch"),
            buy_price: s!("N/A"),
            sell_price: s!("1,200"),
            ..Default::default()
        }
    }

    #[test]
    fn rows_become_recipes() {
        let mut tr = Translator::new(Prefix, TranslationCache::in_memory(), 0);
        let out = build_recipes(
            &TOOLS,
            vec![row("Flimsy Axe", "https://nookipedia.com/wiki/Flimsy_axe"), row("Golden rod", "")],
            &mut tr,
        );

        assert_eq!(out.len(), 2);
        let axe = &out[0];
        assert_eq!(axe.id.as_str(), "flimsy_axe");
        assert_eq!(axe.name_ko, "ko:Flimsy Axe");
        assert_eq!(axe.category_en, "Tools");
        assert_eq!(axe.category_ko, "도구");
        assert_eq!(axe.source_url, "https://nookipedia.com/wiki/Flimsy_axe");
        assert_eq!(axe.materials_ko, "ko:5x Tree branch");
        assert_eq!(axe.source_en, "");
        assert_eq!(axe.source_ko, "");
        assert_eq!(axe.buy_price, None);
        assert_eq!(axe.sell_price, Some(1200));
        assert!(!axe.owned);

        assert_eq!(out[1].source_url, TOOLS.url, "no item link → category page");
    }

    #[test]
    fn detail_fills_only_blanks() {
        let mut r = row("Flimsy axe", "x");
        r.image_url = s!("https://dodo.ac/np/images/a.png");
        let d = Detail { image_url: s!("https://other/b.png"), source_en: s!("Tom Nook") };
        fill_from_detail(&mut r, &d);
        assert_eq!(r.image_url, "https://dodo.ac/np/images/a.png");
        assert_eq!(r.source_en, "Tom Nook");
    }
}
