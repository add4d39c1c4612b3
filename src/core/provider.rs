// File: src/core/provider.rs
use crate::core::types::TermMatch;

/// A spelling-suggestion service.
///
/// Returns candidate corrections for `word` in the service's preferred order.
/// The result may be empty.
pub trait SuggestionProvider {
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// A term-definition service.
///
/// Returns `None` when no definable term is found in `word`.
pub trait DefinitionProvider {
    fn define(&self, word: &str) -> Option<TermMatch>;
}

impl<T: SuggestionProvider + ?Sized> SuggestionProvider for &T {
    fn suggest(&self, word: &str) -> Vec<String> {
        (**self).suggest(word)
    }
}

impl<T: SuggestionProvider + ?Sized> SuggestionProvider for Box<T> {
    fn suggest(&self, word: &str) -> Vec<String> {
        (**self).suggest(word)
    }
}

impl<T: DefinitionProvider + ?Sized> DefinitionProvider for &T {
    fn define(&self, word: &str) -> Option<TermMatch> {
        (**self).define(word)
    }
}

impl<T: DefinitionProvider + ?Sized> DefinitionProvider for Box<T> {
    fn define(&self, word: &str) -> Option<TermMatch> {
        (**self).define(word)
    }
}

/// Suggestion service that never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl SuggestionProvider for NoSuggestions {
    fn suggest(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Suggestions from `primary`, or from `fallback` when `primary` has none.
#[derive(Debug, Clone)]
pub struct OrElse<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> OrElse<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SuggestionProvider, F: SuggestionProvider> SuggestionProvider for OrElse<P, F> {
    fn suggest(&self, word: &str) -> Vec<String> {
        let suggestions = self.primary.suggest(word);
        if suggestions.is_empty() {
            self.fallback.suggest(word)
        } else {
            suggestions
        }
    }
}
