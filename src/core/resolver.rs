// File: src/core/resolver.rs
use crate::core::provider::{DefinitionProvider, SuggestionProvider};
use crate::core::types::Definition;
use tracing::debug;

/// Turns a typed word into an ordered list of definitions.
///
/// Candidates are the spelling suggestions for the query followed by the query
/// itself. Each is looked up in turn until `limit` definitions are collected,
/// then an exact match for the query is moved to the front.
pub struct LookupResolver<S, D> {
    suggestions: S,
    definitions: D,
}

impl<S: SuggestionProvider, D: DefinitionProvider> LookupResolver<S, D> {
    pub fn new(suggestions: S, definitions: D) -> Self {
        Self {
            suggestions,
            definitions,
        }
    }

    pub fn resolve(&self, query: &str, limit: usize) -> Vec<Definition> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return vec![];
        }

        // 1. Collect definitions for every candidate until the budget runs out
        let collected = self.collect(query, limit);
        debug!(query, collected = collected.len(), "candidates resolved");

        // 2. Put the exact query first, looking it up directly if needed
        self.promote_exact(query, collected, limit)
    }

    fn collect(&self, query: &str, budget: usize) -> Vec<Definition> {
        let mut candidates = self.suggestions.suggest(query);
        candidates.push(query.to_string());

        let mut accepted = Vec::with_capacity(budget.min(candidates.len()));
        let mut remaining = budget;
        for candidate in &candidates {
            if remaining == 0 {
                break;
            }
            match self.define(candidate) {
                Some(definition) => {
                    debug!(candidate = candidate.as_str(), headword = definition.headword.as_str(), "accepted");
                    accepted.push(definition);
                    remaining -= 1;
                }
                None => debug!(candidate = candidate.as_str(), "no definition"),
            }
        }
        accepted
    }

    fn promote_exact(&self, query: &str, mut collected: Vec<Definition>, limit: usize) -> Vec<Definition> {
        if let Some(pos) = collected.iter().position(|d| d.headword == query) {
            let exact = collected.remove(pos);
            collected.insert(0, exact);
            return collected;
        }

        if let Some(direct) = self.define(query) {
            collected.insert(0, direct);
            collected.truncate(limit);
        }
        collected
    }

    fn define(&self, word: &str) -> Option<Definition> {
        let found = self.definitions.define(word)?;
        let text = normalize_definition(&found.raw_text)?;
        Some(Definition {
            headword: found.headword,
            text,
        })
    }
}

/// Flattens a raw definition to one line and drops its leading token
/// (the part-of-speech or pronunciation tag). Returns `None` when nothing is
/// left.
pub fn normalize_definition(raw: &str) -> Option<String> {
    let flat = raw.replace('\n', " ");
    let body = flat
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}
