// src/lib.rs

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod host;
pub mod logging;
#[cfg(target_os = "macos")]
pub mod native;
pub mod persistence;

pub use crate::core::engine::DictionaryEngine;
pub use crate::core::provider::{DefinitionProvider, SuggestionProvider};
pub use crate::core::resolver::{normalize_definition, LookupResolver};
pub use crate::core::types::{Definition, TermMatch};
pub use crate::error::{DictError, Result};
