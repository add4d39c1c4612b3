use anyhow::{Context, Result};
use clap::Parser;
use dict_core::config::Config;
use dict_core::host::actions;
use dict_core::host::env::{self, LaunchArgs};
use dict_core::host::input::Input;
use dict_core::host::item::{compile_items, Item};
use dict_core::{host, logging, DictionaryEngine};
use std::path::Path;
use tracing::{debug, error, warn};

fn main() {
    let args = LaunchArgs::parse();
    let support_dir = args.support_dir();

    // A broken config file is left alone so the user can fix it.
    let (config, config_error) = Config::load_or_default(&support_dir);
    logging::init(Some(&support_dir), config.debug || args.debug_log);
    match config_error {
        Some(e) => warn!(error = %e, "using default config"),
        None => {
            if let Err(e) = config.save(&support_dir) {
                warn!(error = %e, "could not write config");
            }
        }
    }

    let input = Input::parse(&args.args);
    debug!(input = ?input, "launcher input");

    if let Some(func) = input.func() {
        if let Err(e) = actions::dispatch(func, &input, args.modifiers()) {
            error!(func, error = %e, "action failed");
        }
        return;
    }

    let payload = match lookup(&args, &config, &support_dir, &input) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %format!("{e:#}"), "lookup failed");
            let mut item = Item::new(format!("{e:#}"));
            item.set_subtitle("error");
            compile_items(&[item])
        }
    };
    println!("{payload}");
}

fn lookup(args: &LaunchArgs, config: &Config, support_dir: &Path, input: &Input) -> Result<String> {
    if input.text().trim().is_empty() {
        return Ok(compile_items(&[]));
    }
    let engine = DictionaryEngine::from_config(config, support_dir, &args.cache_dir())
        .context("could not load the dictionary")?;
    let width = env::window_width(env::launcher_preferences().as_deref(), config.window_width);
    let view = host::respond(&engine, config, input, width);
    Ok(view.compile(&input.text()))
}
