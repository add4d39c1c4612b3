// File: src/host/mod.rs
//! Launcher side of the action: what comes in (arguments, environment),
//! what goes out (items serialized as JSON) and what selecting an item does.

pub mod actions;
pub mod env;
pub mod input;
pub mod item;
pub mod render;

use crate::config::Config;
use crate::core::engine::DictionaryEngine;
use crate::host::input::Input;
use crate::host::item::View;
use tracing::info;

/// Looks up the input text and builds the view of results, with subtitles
/// cut to fit a launcher window `window_width` pixels wide.
pub fn respond(engine: &DictionaryEngine, config: &Config, input: &Input, window_width: f64) -> View {
    let raw = input.text();
    let query = raw.trim();
    let definitions = engine.lookup(query, config.limit);
    info!(query, results = definitions.len(), "lookup finished");

    let mut view = View::new(config.action_default_script.as_str());
    render::render_definitions(&mut view, query, &raw, &definitions, window_width);
    view
}
