// src/config/consts.rs

// Catalog
pub const DEFAULT_CATALOG: &str = "recipes.json";
pub const CATEGORY_ALL: &str = "all";

// Local store (one file per key, like browser local storage)
pub const STORE_DIR: &str = ".store";
pub const OWNED_KEY: &str = "diy_recipes.owned";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
pub const LOG_LEVEL: &str = "info";

// Config file picked up from the working directory when present
pub const CONFIG_FILE: &str = "diy_recipes.toml";

// Display
pub const PLACEHOLDER: &str = "-";

// Net
pub const SITE_ROOT: &str = "https://nookipedia.com";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const PAGE_TIMEOUT_SECS: u64 = 30;
pub const TRANSLATE_TIMEOUT_SECS: u64 = 20;
pub const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

// Scrape
pub const DEFAULT_TRANSLATION_CACHE: &str = "translations.ko.cache.json";
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const DETAIL_PAUSE_MS: u64 = 50;
pub const TRANSLATE_PAUSE_MS: u64 = 100;

// Window
pub const WINDOW_W: f32 = 1100.0;
pub const WINDOW_H: f32 = 760.0;

/// One wiki page per recipe category.
pub struct CategorySource {
    pub category_en: &'static str,
    pub category_ko: &'static str,
    pub url: &'static str,
}

pub const SOURCES: &[CategorySource] = &[
    CategorySource { category_en: "Savory",        category_ko: "푸드",       url: "https://nookipedia.com/wiki/DIY_recipes/Savory" },
    CategorySource { category_en: "Sweet",         category_ko: "디저트",     url: "https://nookipedia.com/wiki/DIY_recipes/Sweet" },
    CategorySource { category_en: "Other",         category_ko: "기타",       url: "https://nookipedia.com/wiki/DIY_recipes/Other" },
    CategorySource { category_en: "Tools",         category_ko: "도구",       url: "https://nookipedia.com/wiki/DIY_recipes/Tools" },
    CategorySource { category_en: "Housewares",    category_ko: "하우스웨어", url: "https://nookipedia.com/wiki/DIY_recipes/Housewares" },
    CategorySource { category_en: "Miscellaneous", category_ko: "잡화",       url: "https://nookipedia.com/wiki/DIY_recipes/Miscellaneous" },
    CategorySource { category_en: "Wall-mounted",  category_ko: "벽걸이",     url: "https://nookipedia.com/wiki/DIY_recipes/Wall-mounted" },
    CategorySource { category_en: "Ceiling decor", category_ko: "천장 장식",  url: "https://nookipedia.com/wiki/DIY_recipes/Ceiling_decor" },
    CategorySource { category_en: "Interior",      category_ko: "인테리어",   url: "https://nookipedia.com/wiki/DIY_recipes/Interior" },
    CategorySource { category_en: "Clothing",      category_ko: "의류",       url: "https://nookipedia.com/wiki/DIY_recipes/Clothing" },
];
