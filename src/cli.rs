// src/cli.rs
//
// Terminal front end. Same controller as the GUI; every command is one
// startup plus at most a handful of events.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::{
    card::Card,
    catalog::CatalogSource,
    check,
    config::{consts::SOURCES, AppOptions},
    controller::{Controller, LinkOpener},
    progress::Progress,
    recipe::RecipeId,
    scrape,
    store::FileStore,
};

#[derive(Parser, Debug)]
#[command(name = "diy_recipes", about = "DIY 레시피 목록 / 보유 체크", long_about = None)]
pub struct Cli {
    /// Config file (default: diy_recipes.toml in the working directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog path or http(s) URL, overriding the config
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the visible recipes
    List {
        /// Category key (category_en) or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive name search (Korean or English)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print the category controls
    Categories,
    /// Flip ownership of the given ids
    Toggle {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Mark the given ids as owned (or not, with --remove)
    Own {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        remove: bool,
    },
    /// Open a recipe's reference page in the browser
    Open { id: String },
    /// Rebuild the data file from the wiki
    Scrape {
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Translation cache file
        #[arg(long)]
        cache: Option<PathBuf>,
    },
    /// Quality report for a data file
    Check {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Exit with code 1 when the report fails
        #[arg(long)]
        strict: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut opts = AppOptions::load(cli.config.as_deref())?;
    if let Some(loc) = cli.catalog {
        opts.catalog.location = loc;
    }
    let _log_guard = crate::log::init(&opts.log);

    match cli.command {
        Command::List { category, search } => {
            let mut ctl = start(&opts)?;
            if let Some(cat) = category {
                if !ctl.on_category_click(&cat) {
                    bail!("unknown category: {cat}");
                }
            }
            if let Some(q) = search {
                ctl.on_search_input(&q);
            }
            for card in ctl.cards() {
                println!("{}", card_line(card));
            }
            println!("{}", ctl.stats());
        }
        Command::Categories => {
            let ctl = start(&opts)?;
            for b in ctl.category_buttons() {
                println!("{}\t{}", b.filter.key(), b.label);
            }
        }
        Command::Toggle { ids } => {
            let mut ctl = start(&opts)?;
            for raw in ids {
                let id = RecipeId::from(raw);
                let now = ctl.on_owned_toggle(&id)
                    .wrap_err_with(|| format!("toggle {id} not saved"))?;
                println!("{id}\t{}", if now { "보유" } else { "미보유" });
            }
            println!("{}", ctl.stats());
        }
        Command::Own { ids, remove } => {
            let mut ctl = start(&opts)?;
            for raw in ids {
                let id = RecipeId::from(raw);
                ctl.on_owned_set(&id, !remove)
                    .wrap_err_with(|| format!("{id} not saved"))?;
            }
            println!("{}", ctl.stats());
        }
        Command::Open { id } => {
            let ctl = start(&opts)?;
            let id = RecipeId::from(id);
            let mut opener = BrowserOpener::default();
            if ctl.on_card_activate(&id, &mut opener).is_none() {
                bail!("{id}: no such recipe or no reference link");
            }
            if let Some(e) = opener.failed {
                return Err(e);
            }
        }
        Command::Scrape { out, cache } => {
            let mut scrape_opts = opts.scrape.clone();
            if let Some(p) = out { scrape_opts.output = p; }
            if let Some(p) = cache { scrape_opts.translation_cache = p; }

            let mut progress = CliProgress::default();
            let summary = scrape::run(&scrape_opts, SOURCES, Some(&mut progress))?;
            eprintln!("{} recipes, {} cached translations", summary.recipes, summary.translations);
        }
        Command::Check { file, strict } => {
            let path = file.unwrap_or_else(|| default_check_path(&opts));
            let report = check::check_file(&path)?;
            println!("{report}");
            if strict && report.has_error() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn start(opts: &AppOptions) -> Result<Controller<FileStore>> {
    let source = CatalogSource::parse(&opts.catalog.location);
    let store = FileStore::new(&opts.store.dir);
    Ok(Controller::start(&source, store, &opts.store.owned_key)?)
}

/// The catalog file when it is local, otherwise the scraper's output file.
fn default_check_path(opts: &AppOptions) -> PathBuf {
    match CatalogSource::parse(&opts.catalog.location) {
        CatalogSource::Path(p) => p,
        CatalogSource::Http(_) | CatalogSource::File(_) => opts.scrape.output.clone(),
    }
}

fn card_line(card: &Card) -> String {
    let mark = if card.owned { "[x]" } else { "[ ]" };
    let price = |p: Option<u64>| p.map(|v| v.to_string()).unwrap_or_else(|| s!("-"));
    format!(
        "{mark} {}\t{}\t{}\t재료: {}\t획득: {}\t{}/{}",
        card.id, card.title, card.category, card.materials, card.source,
        price(card.buy_price), price(card.sell_price),
    )
}

/// System browser via the `open` crate.
#[derive(Default)]
struct BrowserOpener {
    failed: Option<color_eyre::Report>,
}

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            self.failed = Some(eyre!("cannot open {url}: {e}"));
        }
    }
}

/// Scrape progress on stderr.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("[수집] {total}개 카테고리");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str, rows: usize) {
        self.done += 1;
        eprintln!("  [{}/{}] {label} -> {rows}개", self.done, self.total);
    }

    fn item_failed(&mut self, label: &str, err: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {label} 실패: {err}", self.done, self.total);
    }
}
