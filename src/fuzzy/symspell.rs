// File: src/fuzzy/symspell.rs
use crate::core::provider::SuggestionProvider;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Index into `SymSpell::words`; lower ids are more common words.
pub type WordRank = usize;

/// A fast spelling correction engine based on the Symmetric Delete
/// (SymSpell) algorithm. It pre-calculates a dictionary of "deletes" so a
/// lookup only has to generate the deletes of the input, independent of the
/// dictionary size.
#[derive(Clone, Serialize, Deserialize)]
pub struct SymSpell {
    /// Maps a delete variant (e.g., "hapy") to the words it could have come
    /// from (e.g., [rank_of_happy]).
    deletes: HashMap<String, HashSet<WordRank>>,
    /// Lowercased dictionary words in rank order.
    words: Vec<String>,
    max_edit_distance: usize,
    max_suggestions: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize, max_suggestions: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            words: Vec::new(),
            max_edit_distance,
            max_suggestions,
        }
    }

    /// Builds an index from words given in frequency order.
    pub fn from_words<'a, I>(words: I, max_edit_distance: usize, max_suggestions: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut speller = Self::new(max_edit_distance, max_suggestions);
        for word in words {
            speller.add_word(word);
        }
        speller
    }

    /// Adds a word by generating all its delete variants up to the configured
    /// edit distance and mapping them back to the word's rank.
    /// Words already present keep their original rank.
    pub fn add_word(&mut self, word: &str) {
        let word = word.to_lowercase();
        if word.is_empty() || self.contains(&word) {
            return;
        }
        let rank = self.words.len();
        for edit in self.generate_edits(&word) {
            self.deletes.entry(edit).or_default().insert(rank);
        }
        self.words.push(word);
    }

    /// Every word is its own distance-0 delete, so membership is one lookup.
    fn contains(&self, word: &str) -> bool {
        self.deletes
            .get(word)
            .is_some_and(|ranks| ranks.iter().any(|&rank| self.words[rank] == word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Looks up a potentially misspelled word and returns the known words
    /// within the edit distance, closest first, then most common. The input
    /// itself is never suggested.
    pub fn lookup(&self, input: &str) -> Vec<String> {
        let input = input.to_lowercase();
        if input.is_empty() || self.max_suggestions == 0 {
            return vec![];
        }

        let mut candidates = HashSet::new();
        for edit in self.generate_edits(&input) {
            if let Some(ranks) = self.deletes.get(&edit) {
                candidates.extend(ranks.iter().copied());
            }
        }

        let mut scored: Vec<(usize, WordRank)> = candidates
            .into_iter()
            .filter(|&rank| self.words[rank] != input)
            .filter_map(|rank| {
                let distance = edit_distance(&input, &self.words[rank]);
                (distance <= self.max_edit_distance).then_some((distance, rank))
            })
            .collect();

        // Ranks are unique, so (distance, rank) is a total order.
        scored.sort_unstable();

        scored
            .into_iter()
            .take(self.max_suggestions)
            .map(|(_, rank)| self.words[rank].clone())
            .collect()
    }

    /// Generates all unique string variants within the max_edit_distance.
    /// This includes the original string itself.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string()); // Distance 0

        let mut current_edits = edits.clone();

        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in current_edits {
                let chars: Vec<char> = edit.chars().collect();
                for i in 0..chars.len() {
                    let deleted_variant: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.clone());
            current_edits = next_edits;
        }

        edits
    }
}

impl SuggestionProvider for SymSpell {
    fn suggest(&self, word: &str) -> Vec<String> {
        self.lookup(word.trim())
    }
}

/// Optimal string alignment distance: insertions, deletions, substitutions
/// and adjacent transpositions each cost one.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        d[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
            }
        }
    }
    d[n][m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speller() -> SymSpell {
        SymSpell::from_words(["happy", "hippy", "harpy", "cat", "cats", "catty", "act"], 2, 8)
    }

    #[test]
    fn distance_counts_transpositions_once() {
        assert_eq!(edit_distance("hapy", "happy"), 1);
        assert_eq!(edit_distance("cta", "cat"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn closest_and_most_common_first() {
        let s = speller();
        let out = s.lookup("hapy");
        assert_eq!(out[0], "happy");
        assert!(out.contains(&"harpy".to_string()));
        assert!(out.contains(&"hippy".to_string()));
    }

    #[test]
    fn input_is_not_its_own_suggestion() {
        let s = speller();
        let out = s.lookup("Cat");
        assert!(!out.contains(&"cat".to_string()));
        assert_eq!(out[0], "cats");
        assert!(out.contains(&"act".to_string()));
    }

    #[test]
    fn caps_number_of_suggestions() {
        let s = SymSpell::from_words(["aa", "ab", "ac", "ad", "ae"], 1, 2);
        assert_eq!(s.lookup("a").len(), 2);
        assert_eq!(s.lookup("a"), vec!["aa".to_string(), "ab".to_string()]);
    }

    #[test]
    fn unknown_words_yield_nothing() {
        assert!(speller().suggest("xyzzyq").is_empty());
        assert!(speller().suggest("  ").is_empty());
    }
}
