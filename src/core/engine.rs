use crate::cache::Cache;
use crate::config::Config;
use crate::core::provider::{DefinitionProvider, SuggestionProvider};
use crate::core::resolver::LookupResolver;
use crate::core::types::Definition;
use crate::error::{CacheError, Result};
use crate::persistence::{load_or_build, WordIndex};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const WORD_INDEX_FILE: &str = "word_index.bin";

pub type BoxedResolver = LookupResolver<Box<dyn SuggestionProvider>, Box<dyn DefinitionProvider>>;

// The engine composes the resolver with an optional lookup cache.
pub struct DictionaryEngine {
    resolver: BoxedResolver,
    cache: Option<(Cache, Duration)>,
}

impl DictionaryEngine {
    pub fn new(suggestions: Box<dyn SuggestionProvider>, definitions: Box<dyn DefinitionProvider>) -> Self {
        Self {
            resolver: LookupResolver::new(suggestions, definitions),
            cache: None,
        }
    }

    /// Caches lookups in `cache` for `ttl`. A zero ttl leaves caching off.
    pub fn with_cache(mut self, cache: Cache, ttl: Duration) -> Self {
        self.cache = (!ttl.is_zero()).then_some((cache, ttl));
        self
    }

    /// Builds the engine the action runs with. On macOS the system spell
    /// checker and dictionary answer, with the compiled word list as the
    /// fallback speller; elsewhere the word list does both.
    pub fn from_config(config: &Config, support_dir: &Path, cache_dir: &Path) -> Result<Self> {
        let index = load_or_build(
            &config.word_list_path(support_dir),
            &cache_dir.join(WORD_INDEX_FILE),
            config.max_edit_distance,
            config.max_suggestions,
        )?;
        let engine = Self::from_index(index).with_cache(Cache::new(cache_dir), config.cache_ttl());
        Ok(engine)
    }

    #[cfg(target_os = "macos")]
    pub fn from_index(index: WordIndex) -> Self {
        use crate::core::provider::OrElse;
        use crate::native::{SystemDictionary, SystemSpellChecker};

        let system = SystemSpellChecker::new(index.speller.max_suggestions());
        Self::new(Box::new(OrElse::new(system, index.speller)), Box::new(SystemDictionary))
    }

    #[cfg(not(target_os = "macos"))]
    pub fn from_index(index: WordIndex) -> Self {
        Self::new(Box::new(index.speller), Box::new(index.words))
    }

    pub fn lookup(&self, query: &str, limit: usize) -> Vec<Definition> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return vec![];
        }

        let Some((cache, ttl)) = &self.cache else {
            return self.resolver.resolve(query, limit);
        };

        let key = format!("lookup:{limit}:{query}");
        match cache.get::<Vec<Definition>>(&key) {
            Ok((definitions, _)) => {
                debug!(query, "cache hit");
                return definitions;
            }
            Err(CacheError::DoesNotExist | CacheError::Expired { .. }) => {}
            Err(e) => warn!(query, error = %e, "ignoring cached lookup"),
        }

        let definitions = self.resolver.resolve(query, limit);
        if let Err(e) = cache.set(&key, &definitions, *ttl) {
            warn!(query, error = %e, "could not cache lookup");
        }
        definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::NoSuggestions;
    use crate::core::types::TermMatch;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl DefinitionProvider for Counting {
        fn define(&self, word: &str) -> Option<TermMatch> {
            self.calls.set(self.calls.get() + 1);
            (word == "cat").then(|| TermMatch::new("cat", "noun a small feline"))
        }
    }

    fn engine(calls: &Rc<Cell<usize>>) -> DictionaryEngine {
        DictionaryEngine::new(Box::new(NoSuggestions), Box::new(Counting { calls: calls.clone() }))
    }

    #[test]
    fn lookup_without_cache_resolves_every_time() {
        let calls = Rc::new(Cell::new(0));
        let engine = engine(&calls);
        assert_eq!(engine.lookup("cat", 5), vec![Definition::new("cat", "a small feline")]);
        assert_eq!(engine.lookup("cat", 5).len(), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn cached_lookups_skip_the_services() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let engine = engine(&calls).with_cache(Cache::new(dir.path()), Duration::from_secs(60));

        let first = engine.lookup(" cat ", 5);
        let second = engine.lookup("cat", 5);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn zero_ttl_disables_cache() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let engine = engine(&calls).with_cache(Cache::new(dir.path()), Duration::ZERO);
        engine.lookup("cat", 5);
        engine.lookup("cat", 5);
        assert_eq!(calls.get(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_query_and_zero_limit_touch_nothing() {
        let calls = Rc::new(Cell::new(0));
        let engine = engine(&calls);
        assert!(engine.lookup("   ", 5).is_empty());
        assert!(engine.lookup("cat", 0).is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn from_config_uses_word_list_in_support_dir() {
        let support = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        std::fs::write(support.path().join("words.tsv"), "happy\tadjective feeling or showing pleasure.\n").unwrap();

        let engine = DictionaryEngine::from_config(&Config::default(), support.path(), cache.path()).unwrap();
        assert!(cache.path().join(WORD_INDEX_FILE).exists());
        if cfg!(not(target_os = "macos")) {
            assert_eq!(
                engine.lookup("hapy", 10),
                vec![Definition::new("happy", "feeling or showing pleasure.")]
            );
        }
    }
}
