// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Index of a distinct word in the vocabulary.
pub type WordId = usize;
/// Index of a document in the corpus.
pub type DocId = usize;
/// Index of a topic, `0..num_topics`.
pub type TopicId = usize;

/// The current topic of a single word occurrence.
/// `position` is kept for traceability; resampling only reads `doc`, `word` and `topic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub doc: DocId,
    pub position: usize,
    pub word: WordId,
    pub topic: TopicId,
}

/// Topic chosen for one occurrence by `LdaSampler::doc_detail`.
#[derive(Debug, Clone, PartialEq)]
pub struct WordTopicDetail {
    pub word: String,
    pub position: usize,
    pub topic: TopicId,
    /// Top words of `topic`, most probable first.
    pub topic_words: Vec<String>,
}

/// A topic and its probability within a document.
pub type DocKey = (TopicId, f64);
