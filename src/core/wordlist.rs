// File: src/core/wordlist.rs
use crate::core::provider::DefinitionProvider;
use crate::core::types::TermMatch;
use crate::error::{DictError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Inflection endings tried when a form is not itself a headword.
const STEM_SUFFIXES: [&str; 8] = ["'s", "es", "s", "ed", "ing", "ly", "er", "est"];
const MIN_STEM_CHARS: usize = 2;

/// A single dictionary entry as read from the word list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    pub headword: String,
    /// Definition body; its first token is the part-of-speech tag.
    pub definition: String,
}

/// An in-memory dictionary loaded from a tab-separated word list.
///
/// Entries keep file order, which doubles as a frequency rank for spelling
/// suggestions (earlier lines are treated as more common words).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordList {
    entries: Vec<WordEntry>,
    /// Lowercased headword -> index into `entries`.
    index: HashMap<String, usize>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `headword<TAB>definition` lines. Blank lines and `#` comments
    /// are skipped, a literal `\n` in a definition becomes a line break.
    pub fn parse(source: &str) -> Result<Self> {
        let mut list = Self::new();
        for (n, line) in source.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let (headword, definition) = line.split_once('\t').ok_or_else(|| DictError::WordList {
                line: n + 1,
                reason: "missing tab between headword and definition".to_string(),
            })?;
            let headword = headword.trim();
            if headword.is_empty() {
                return Err(DictError::WordList {
                    line: n + 1,
                    reason: "empty headword".to_string(),
                });
            }
            list.insert(headword, &definition.replace("\\n", "\n"));
        }
        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| DictError::io(path, e))?;
        Self::parse(&source)
    }

    /// Adds an entry. The first definition of a headword wins.
    pub fn insert(&mut self, headword: &str, definition: &str) {
        let key = headword.to_lowercase();
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(WordEntry {
            headword: headword.to_string(),
            definition: definition.to_string(),
        });
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.index
            .get(&word.to_lowercase())
            .map(|&id| &self.entries[id])
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the span of `text` that names a known term.
    ///
    /// Tries the whole text, then its first word; for each, the form itself
    /// and then the form with a common inflection ending removed.
    fn term_range<'a>(&self, text: &'a str) -> Option<(&'a str, &WordEntry)> {
        let mut forms = vec![text];
        if let Some(first) = text.split_whitespace().next() {
            if first != text {
                forms.push(first);
            }
        }

        for form in forms {
            if let Some(entry) = self.get(form) {
                return Some((form, entry));
            }
            for suffix in STEM_SUFFIXES {
                let Some(stem) = strip_suffix_ignore_case(form, suffix) else {
                    continue;
                };
                if stem.chars().count() < MIN_STEM_CHARS {
                    continue;
                }
                if let Some(entry) = self.get(stem) {
                    return Some((stem, entry));
                }
            }
        }
        None
    }
}

fn strip_suffix_ignore_case<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = word.len().checked_sub(suffix.len())?;
    if !word.is_char_boundary(cut) {
        return None;
    }
    let (stem, tail) = word.split_at(cut);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

impl DefinitionProvider for WordList {
    fn define(&self, word: &str) -> Option<TermMatch> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        self.term_range(word)
            .map(|(span, entry)| TermMatch::new(span, entry.definition.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# sample\n\
        happy\tadjective feeling or showing pleasure.\n\
        \n\
        cat\tnoun a small domesticated carnivore\\n▶ informal a person\n\
        run\tverb move at a speed faster than a walk\n\
        happy\tadjective duplicate that must be ignored\n";

    #[test]
    fn parses_entries_and_escapes() {
        let list = WordList::parse(SAMPLE).unwrap();
        assert_eq!(list.len(), 3);
        let cat = list.get("CAT").unwrap();
        assert_eq!(cat.definition, "noun a small domesticated carnivore\n▶ informal a person");
        assert_eq!(list.get("happy").unwrap().definition, "adjective feeling or showing pleasure.");
    }

    #[test]
    fn reports_line_of_malformed_entry() {
        let err = WordList::parse("cat\tnoun feline\ndog noun canine\n").unwrap_err();
        match err {
            DictError::WordList { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(WordList::parse("\tnoun nothing\n").is_err());
    }

    #[test]
    fn define_preserves_input_case_of_span() {
        let list = WordList::parse(SAMPLE).unwrap();
        let found = list.define("Happy").unwrap();
        assert_eq!(found.headword, "Happy");
        assert_eq!(found.raw_text, "adjective feeling or showing pleasure.");
    }

    #[test]
    fn define_matches_stems_and_first_word() {
        let list = WordList::parse(SAMPLE).unwrap();
        assert_eq!(list.define("cats").unwrap().headword, "cat");
        assert_eq!(list.define("cat's").unwrap().headword, "cat");
        assert_eq!(list.define("runs").unwrap().headword, "run");
        assert_eq!(list.define("happy hour").unwrap().headword, "happy");
        assert!(list.define("xyzzy").is_none());
        assert!(list.define("   ").is_none());
    }

    #[test]
    fn short_stems_are_not_matched() {
        let mut list = WordList::new();
        list.insert("a", "article the indefinite article");
        assert!(list.define("as").is_none());
    }
}
