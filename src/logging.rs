// File: src/logging.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "error.log";

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "dict_core=debug,dict=debug,repl=debug"
    } else {
        "dict_core=info,dict=info,repl=info"
    }
}

/// Installs the global subscriber. Events go to `error.log` in `support_dir`
/// (stdout carries the launcher payload), or to stderr when that file cannot
/// be opened. Calling this twice keeps the first subscriber.
pub fn init(support_dir: Option<&Path>, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let log_file = support_dir.and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    let _ = match log_file {
        Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
}
