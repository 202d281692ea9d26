// --- File: src/core/vocabulary.rs
use crate::core::types::WordId;
use std::collections::HashMap;

/// Bijective mapping between distinct word tokens and dense `WordId`s.
/// Ids are handed out in first-occurrence order, so the same corpus always
/// produces the same enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, WordId>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the vocabulary of a tokenized corpus.
    pub fn from_documents(docs: &[Vec<String>]) -> Self {
        let mut vocab = Self::new();
        for word in docs.iter().flatten() {
            vocab.get_or_insert(word);
        }
        vocab
    }

    /// Rebuilds a vocabulary from an ordered word list.
    /// Returns `None` if the list contains a duplicate.
    pub fn from_words(words: Vec<String>) -> Option<Self> {
        let mut index = HashMap::with_capacity(words.len());
        for (id, word) in words.iter().enumerate() {
            if index.insert(word.clone(), id).is_some() {
                return None;
            }
        }
        Some(Self { words, index })
    }

    /// Gets the id of a word, assigning the next free id if it is new.
    pub fn get_or_insert(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.index.get(word) {
            id
        } else {
            let id = self.words.len();
            self.words.push(word.to_string());
            self.index.insert(word.to_string(), id);
            id
        }
    }

    pub fn id(&self, word: &str) -> Option<WordId> {
        self.index.get(word).copied()
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Read-only word -> id mapping.
    pub fn mapping(&self) -> &HashMap<String, WordId> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.split(' ').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn first_occurrence_order() {
        let vocab = Vocabulary::from_documents(&docs(&["cat cat cat", "cat dog rabbit"]));
        assert_eq!(vocab.words(), ["cat", "dog", "rabbit"]);
        assert_eq!(vocab.id("dog"), Some(1));
        assert_eq!(vocab.word(2), Some("rabbit"));
        assert_eq!(vocab.id("fish"), None);
        assert_eq!(vocab.word(3), None);
    }

    #[test]
    fn mapping_is_bijective() {
        let vocab = Vocabulary::from_documents(&docs(&["a b c", "c d a", "e"]));
        assert_eq!(vocab.mapping().len(), vocab.len());
        for (word, &id) in vocab.mapping() {
            assert_eq!(vocab.word(id), Some(word.as_str()));
        }
    }

    #[test]
    fn from_words_rejects_duplicates() {
        assert!(Vocabulary::from_words(vec!["a".into(), "b".into(), "a".into()]).is_none());
        let vocab = Vocabulary::from_words(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(vocab.id("y"), Some(1));
    }
}
