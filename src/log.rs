// src/log.rs
//
// Thin front for `tracing`. Call sites keep the short logf!/logd!/loge!
// macros; `init` decides where the events end up (a plain-text file under
// the store directory, filtered by RUST_LOG or the configured level).

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::options::LogOptions;

/// Install the file subscriber. Keep the returned guard alive for the whole
/// run so buffered lines get flushed on exit.
///
/// Best-effort: if the directory cannot be created or a subscriber is
/// already installed, the app keeps running without a log file.
pub fn init(opts: &LogOptions) -> Option<WorkerGuard> {
    let path = Path::new(&opts.file);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path.file_name()?;

    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Log: cannot create {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&opts.level));

    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();

    match installed {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
