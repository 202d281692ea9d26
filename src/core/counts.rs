// File: src/core/counts.rs
use crate::core::types::{Assignment, DocId, TopicId, WordId};

/// The four count tables of a collapsed Gibbs sampler, stored as flat
/// row-major vectors keyed by integer ids.
///
/// * `nt[t]`     occurrences assigned to topic `t`
/// * `nd[d]`     length of document `d` (never changed by resampling)
/// * `nwt[w][t]` occurrences of word `w` assigned to topic `t`
/// * `ndt[d][t]` occurrences in document `d` assigned to topic `t`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTables {
    num_topics: usize,
    nt: Vec<usize>,
    nd: Vec<usize>,
    nwt: Vec<usize>,
    ndt: Vec<usize>,
}

impl CountTables {
    /// All-zero tables for documents of the given lengths.
    pub fn zeros(doc_lengths: Vec<usize>, vocab_size: usize, num_topics: usize) -> Self {
        let num_docs = doc_lengths.len();
        Self {
            num_topics,
            nt: vec![0; num_topics],
            nd: doc_lengths,
            nwt: vec![0; vocab_size * num_topics],
            ndt: vec![0; num_docs * num_topics],
        }
    }

    /// Tallies a full assignment list from scratch. Callers must have checked
    /// that every id in `assignments` is in range.
    pub fn from_assignments(
        doc_lengths: Vec<usize>,
        vocab_size: usize,
        num_topics: usize,
        assignments: &[Assignment],
    ) -> Self {
        let mut counts = Self::zeros(doc_lengths, vocab_size, num_topics);
        for z in assignments {
            counts.add(z.doc, z.word, z.topic);
        }
        counts
    }

    /// Rebuilds tables from nested rows. Returns `None` on any shape mismatch.
    pub fn from_rows(
        num_topics: usize,
        nt: Vec<usize>,
        nd: Vec<usize>,
        nwt: Vec<Vec<usize>>,
        ndt: Vec<Vec<usize>>,
    ) -> Option<Self> {
        if nt.len() != num_topics || ndt.len() != nd.len() {
            return None;
        }
        if nwt.iter().chain(ndt.iter()).any(|row| row.len() != num_topics) {
            return None;
        }
        Some(Self {
            num_topics,
            nt,
            nd,
            nwt: nwt.into_iter().flatten().collect(),
            ndt: ndt.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn add(&mut self, doc: DocId, word: WordId, topic: TopicId) {
        let t = self.num_topics;
        self.nt[topic] += 1;
        self.nwt[word * t + topic] += 1;
        self.ndt[doc * t + topic] += 1;
    }

    /// Undoes one `add`. The occurrence must currently be counted under `topic`.
    #[inline]
    pub fn remove(&mut self, doc: DocId, word: WordId, topic: TopicId) {
        let t = self.num_topics;
        debug_assert!(self.nt[topic] > 0, "nt[{topic}] would go negative");
        debug_assert!(self.nwt[word * t + topic] > 0, "nwt[{word}][{topic}] would go negative");
        debug_assert!(self.ndt[doc * t + topic] > 0, "ndt[{doc}][{topic}] would go negative");
        self.nt[topic] -= 1;
        self.nwt[word * t + topic] -= 1;
        self.ndt[doc * t + topic] -= 1;
    }

    #[inline]
    pub fn nt(&self, topic: TopicId) -> usize {
        self.nt[topic]
    }

    #[inline]
    pub fn nd(&self, doc: DocId) -> usize {
        self.nd[doc]
    }

    #[inline]
    pub fn nwt(&self, word: WordId, topic: TopicId) -> usize {
        self.nwt[word * self.num_topics + topic]
    }

    #[inline]
    pub fn ndt(&self, doc: DocId, topic: TopicId) -> usize {
        self.ndt[doc * self.num_topics + topic]
    }

    pub fn topic_totals(&self) -> &[usize] {
        &self.nt
    }

    pub fn doc_lengths(&self) -> &[usize] {
        &self.nd
    }

    /// `nwt[word][..]`
    pub fn word_topic_row(&self, word: WordId) -> &[usize] {
        let t = self.num_topics;
        &self.nwt[word * t..(word + 1) * t]
    }

    /// `ndt[doc][..]`
    pub fn doc_topic_row(&self, doc: DocId) -> &[usize] {
        let t = self.num_topics;
        &self.ndt[doc * t..(doc + 1) * t]
    }

    pub fn word_topic_rows(&self) -> Vec<Vec<usize>> {
        self.nwt.chunks(self.num_topics).map(<[usize]>::to_vec).collect()
    }

    pub fn doc_topic_rows(&self) -> Vec<Vec<usize>> {
        self.ndt.chunks(self.num_topics).map(<[usize]>::to_vec).collect()
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn num_docs(&self) -> usize {
        self.nd.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.nwt.len() / self.num_topics
    }

    pub fn total(&self) -> usize {
        self.nt.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(doc: DocId, position: usize, word: WordId, topic: TopicId) -> Assignment {
        Assignment { doc, position, word, topic }
    }

    #[test]
    fn tally_from_assignments() {
        let zs = [z(0, 0, 0, 1), z(0, 1, 0, 1), z(1, 0, 0, 0), z(1, 1, 1, 1)];
        let counts = CountTables::from_assignments(vec![2, 2], 2, 2, &zs);
        assert_eq!(counts.topic_totals(), [1, 3]);
        assert_eq!(counts.word_topic_row(0), [1, 2]);
        assert_eq!(counts.word_topic_row(1), [0, 1]);
        assert_eq!(counts.doc_topic_row(0), [0, 2]);
        assert_eq!(counts.doc_topic_row(1), [1, 1]);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.vocab_size(), 2);
    }

    #[test]
    fn add_then_remove_restores() {
        let mut counts = CountTables::zeros(vec![3], 2, 3);
        let before = counts.clone();
        counts.add(0, 1, 2);
        assert_eq!(counts.nt(2), 1);
        assert_eq!(counts.nwt(1, 2), 1);
        assert_eq!(counts.ndt(0, 2), 1);
        counts.remove(0, 1, 2);
        assert_eq!(counts, before);
        assert_eq!(counts.nd(0), 3);
    }

    #[test]
    fn rows_round_trip() {
        let zs = [z(0, 0, 1, 0), z(1, 0, 0, 1), z(1, 1, 2, 1)];
        let counts = CountTables::from_assignments(vec![1, 2], 3, 2, &zs);
        let rebuilt = CountTables::from_rows(
            2,
            counts.topic_totals().to_vec(),
            counts.doc_lengths().to_vec(),
            counts.word_topic_rows(),
            counts.doc_topic_rows(),
        )
        .unwrap();
        assert_eq!(rebuilt, counts);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        assert!(CountTables::from_rows(2, vec![1, 0], vec![1], vec![vec![1]], vec![vec![1, 0]]).is_none());
        assert!(CountTables::from_rows(2, vec![1], vec![1], vec![vec![1, 0]], vec![vec![1, 0]]).is_none());
        assert!(CountTables::from_rows(2, vec![1, 0], vec![1, 1], vec![vec![1, 0]], vec![vec![1, 0]]).is_none());
    }
}
