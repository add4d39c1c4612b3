// File: src/persistence.rs
use crate::core::wordlist::WordList;
use crate::error::{DictError, Result};
use crate::fuzzy::symspell::SymSpell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// The compiled form of a word list: the definitions plus the SymSpell
/// delete index built over its headwords.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct WordIndex {
    pub words: WordList,
    pub speller: SymSpell,
}

impl WordIndex {
    pub fn build(words: WordList, max_edit_distance: usize, max_suggestions: usize) -> Self {
        let speller = SymSpell::from_words(
            words.entries().iter().map(|e| e.headword.as_str()),
            max_edit_distance,
            max_suggestions,
        );
        Self { words, speller }
    }

    pub fn empty(max_edit_distance: usize, max_suggestions: usize) -> Self {
        Self::build(WordList::new(), max_edit_distance, max_suggestions)
    }

    /// Whether the speller was built with these settings.
    pub fn matches(&self, max_edit_distance: usize, max_suggestions: usize) -> bool {
        self.speller.max_edit_distance() == max_edit_distance
            && self.speller.max_suggestions() == max_suggestions
    }
}

pub fn save_to_disk(index: &WordIndex, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| DictError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| DictError::io(parent_dir, e))?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, index)?;

    temp_file
        .persist(path)
        .map_err(|e| DictError::io(path, e.error))?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<WordIndex> {
    let file = File::open(path).map_err(|e| DictError::io(path, e))?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

/// Loads the compiled index for `source`, rebuilding it when it is missing,
/// unreadable, older than the source list or built with other speller
/// settings.
///
/// A missing source list gives an empty index. Failing to save a rebuilt
/// index is logged and otherwise ignored.
pub fn load_or_build(
    source: &Path,
    index_path: &Path,
    max_edit_distance: usize,
    max_suggestions: usize,
) -> Result<WordIndex> {
    let Some(source_modified) = modified(source) else {
        warn!(path = %source.display(), "word list not found, lookups will use an empty dictionary");
        return Ok(WordIndex::empty(max_edit_distance, max_suggestions));
    };

    if modified(index_path).is_some_and(|built| built >= source_modified) {
        match load_from_disk(index_path) {
            Ok(index) if index.matches(max_edit_distance, max_suggestions) => {
                debug!(path = %index_path.display(), words = index.words.len(), "loaded word index");
                return Ok(index);
            }
            Ok(_) => info!(path = %index_path.display(), "speller settings changed, rebuilding word index"),
            Err(e) => warn!(path = %index_path.display(), error = %e, "discarding unreadable word index"),
        }
    }

    let words = WordList::load(source)?;
    let index = WordIndex::build(words, max_edit_distance, max_suggestions);
    info!(path = %source.display(), words = index.words.len(), "compiled word index");

    if let Err(e) = save_to_disk(&index, index_path) {
        warn!(path = %index_path.display(), error = %e, "could not save word index");
    }
    Ok(index)
}

fn modified(path: &Path) -> Option<std::time::SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::{DefinitionProvider, SuggestionProvider};

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("word_index.bin");
        let words = WordList::parse("happy\tadjective glad\n").unwrap();
        save_to_disk(&WordIndex::build(words, 2, 8), &path).unwrap();

        let loaded = load_from_disk(&path).unwrap();
        assert_eq!(loaded.words.define("happy").unwrap().headword, "happy");
        assert_eq!(loaded.speller.suggest("hapy"), vec!["happy".to_string()]);
    }

    #[test]
    fn builds_and_caches_index_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.tsv");
        let index_path = dir.path().join("cache").join("word_index.bin");
        fs::write(&source, "cat\tnoun feline\nrun\tverb move fast\n").unwrap();

        let index = load_or_build(&source, &index_path, 2, 8).unwrap();
        assert_eq!(index.words.len(), 2);
        assert!(index_path.exists());

        let again = load_or_build(&source, &index_path, 2, 8).unwrap();
        assert_eq!(again.speller.len(), 2);
    }

    #[test]
    fn changed_speller_settings_rebuild_the_index() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.tsv");
        let index_path = dir.path().join("word_index.bin");
        fs::write(&source, "aa\tn one\nab\tn two\nac\tn three\nad\tn four\n").unwrap();

        let wide = load_or_build(&source, &index_path, 1, 8).unwrap();
        assert_eq!(wide.speller.suggest("a").len(), 4);

        let narrow = load_or_build(&source, &index_path, 1, 1).unwrap();
        assert_eq!(narrow.speller.suggest("a"), vec!["aa".to_string()]);

        let exact = load_or_build(&source, &index_path, 0, 1).unwrap();
        assert!(exact.speller.suggest("a").is_empty());
        assert!(load_from_disk(&index_path).unwrap().matches(0, 1));
    }

    #[test]
    fn missing_source_gives_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = load_or_build(&dir.path().join("none.tsv"), &dir.path().join("i.bin"), 2, 8).unwrap();
        assert!(index.words.is_empty());
        assert!(index.speller.is_empty());
    }

    #[test]
    fn corrupt_index_is_rebuilt() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.tsv");
        let index_path = dir.path().join("word_index.bin");
        fs::write(&source, "cat\tnoun feline\n").unwrap();
        fs::write(&index_path, b"not bincode").unwrap();

        let index = load_or_build(&source, &index_path, 2, 8).unwrap();
        assert_eq!(index.words.len(), 1);
    }
}
