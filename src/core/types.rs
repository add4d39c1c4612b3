// src/core/types.rs
use serde::{Deserialize, Serialize};

/// One row of a lookup result: the matched headword and its cleaned-up,
/// single-line definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub headword: String,
    pub text: String,
}

impl Definition {
    pub fn new(headword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            text: text.into(),
        }
    }
}

/// Raw answer of a definition service.
///
/// `headword` is the part of the looked-up word the service actually matched,
/// which can be shorter than the word (a stem, or the first word of a phrase).
/// `raw_text` is the unprocessed, possibly multi-line definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub headword: String,
    pub raw_text: String,
}

impl TermMatch {
    pub fn new(headword: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            raw_text: raw_text.into(),
        }
    }
}
