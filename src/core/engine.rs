// File: src/core/engine.rs
use crate::config::SamplerConfig;
use crate::core::counts::CountTables;
use crate::core::ranking::top_k;
use crate::core::types::{Assignment, DocId, DocKey, TopicId, WordId, WordTopicDetail};
use crate::core::vocabulary::Vocabulary;
use crate::error::{check_index, LdaError, Result};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Words listed per topic by `topic_keys` unless told otherwise.
pub const DEFAULT_NUM_DISPLAYED: usize = 5;
/// Minimum probability for a topic to appear in `doc_keys` by default.
pub const DEFAULT_DOC_KEY_THRESHOLD: f64 = 0.02;

/// Collapsed Gibbs sampler for Latent Dirichlet Allocation.
///
/// Owns the corpus, the vocabulary, one topic assignment per word occurrence
/// and the count tables derived from those assignments. The random source is
/// injected so that runs can be reproduced from a seed.
#[derive(Debug, Clone)]
pub struct LdaSampler<R = StdRng> {
    pub(crate) config: SamplerConfig,
    pub(crate) docs: Vec<Vec<String>>,
    pub(crate) vocab: Vocabulary,
    pub(crate) counts: CountTables,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) rng: R,
    /// Per-topic weights reused across resampling steps.
    pub(crate) weights: Vec<f64>,
}

impl LdaSampler<StdRng> {
    /// Builds a sampler whose initial assignments and sweeps are driven by `seed`.
    pub fn with_seed(docs: Vec<Vec<String>>, config: SamplerConfig, seed: u64) -> Result<Self> {
        Self::new(docs, config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(docs: Vec<Vec<String>>, config: SamplerConfig) -> Result<Self> {
        Self::new(docs, config, StdRng::from_entropy())
    }
}

impl<R: Rng> LdaSampler<R> {
    /// Builds the vocabulary, draws a uniformly random initial topic for every
    /// word occurrence (in corpus order) and tallies the count tables.
    pub fn new(docs: Vec<Vec<String>>, config: SamplerConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let total: usize = docs.iter().map(Vec::len).sum();
        if docs.is_empty() || total == 0 {
            return Err(LdaError::InvalidConfiguration(
                "corpus must contain at least one word".to_string(),
            ));
        }

        let num_topics = config.num_topics;
        let vocab = Vocabulary::from_documents(&docs);
        let doc_lengths = docs.iter().map(Vec::len).collect();
        let mut counts = CountTables::zeros(doc_lengths, vocab.len(), num_topics);
        let mut assignments = Vec::with_capacity(total);

        for (doc, words) in docs.iter().enumerate() {
            for (position, token) in words.iter().enumerate() {
                // Every token went into the vocabulary above.
                let word = vocab.id(token).ok_or_else(|| {
                    LdaError::CorruptState(format!("token '{token}' missing from vocabulary"))
                })?;
                let topic = rng.gen_range(0..num_topics);
                counts.add(doc, word, topic);
                assignments.push(Assignment { doc, position, word, topic });
            }
        }

        debug!(
            "initialised LDA sampler: {} documents, {} distinct words, {} occurrences, {} topics",
            docs.len(),
            vocab.len(),
            total,
            num_topics
        );

        Ok(Self {
            config,
            docs,
            vocab,
            counts,
            assignments,
            rng,
            weights: vec![0.0; num_topics],
        })
    }

    /// One iteration of the Markov chain: resamples every assignment once,
    /// in the order the occurrences were enumerated at construction.
    pub fn sweep(&mut self) {
        for index in 0..self.assignments.len() {
            self.sample(index);
        }
        trace!("sweep over {} assignments complete", self.assignments.len());
    }

    /// Runs `iterations` sweeps back to back.
    pub fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.sweep();
        }
        debug!("ran {} sweeps", iterations);
    }

    /// Resamples the topic of a single occurrence from its full conditional.
    fn sample(&mut self, index: usize) {
        let Assignment { doc, word, topic: old_topic, .. } = self.assignments[index];

        // Leave-one-out: the conditional excludes the occurrence's own assignment.
        self.counts.remove(doc, word, old_topic);

        let mut total = 0.0;
        for topic in 0..self.config.num_topics {
            let f = self.conditional(doc, word, topic);
            self.weights[topic] = f;
            total += f;
        }
        let u: f64 = self.rng.gen();
        let new_topic = draw_topic(&self.weights, u * total);

        self.assignments[index].topic = new_topic;
        self.counts.add(doc, word, new_topic);
    }
}

/// Walks `weights` subtracting each from `r`, returning the first topic at which
/// `r` drops below zero. Falls back to the last topic when roundoff leaves `r`
/// non-negative, so a topic is always chosen.
pub(crate) fn draw_topic(weights: &[f64], mut r: f64) -> TopicId {
    for (topic, &w) in weights.iter().enumerate() {
        r -= w;
        if r < 0.0 {
            return topic;
        }
    }
    weights.len().saturating_sub(1)
}

// Read-only queries. None of these touch the random source.
impl<R> LdaSampler<R> {
    /// `P(word | topic) = (nwt[w][t] + beta) / (nt[t] + W * beta)`
    #[inline]
    fn pw_z(&self, word: WordId, topic: TopicId) -> f64 {
        let beta = self.config.beta;
        (self.counts.nwt(word, topic) as f64 + beta)
            / (self.counts.nt(topic) as f64 + self.vocab.len() as f64 * beta)
    }

    /// `P(topic | doc) = (ndt[d][t] + alpha) / (nd[d] + T * alpha)`
    #[inline]
    fn pz_d(&self, doc: DocId, topic: TopicId) -> f64 {
        let alpha = self.config.alpha;
        (self.counts.ndt(doc, topic) as f64 + alpha)
            / (self.counts.nd(doc) as f64 + self.config.num_topics as f64 * alpha)
    }

    pub fn word_given_topic(&self, word: WordId, topic: TopicId) -> Result<f64> {
        check_index("word", word, self.vocab.len())?;
        check_index("topic", topic, self.config.num_topics)?;
        Ok(self.pw_z(word, topic))
    }

    pub fn topic_given_document(&self, doc: DocId, topic: TopicId) -> Result<f64> {
        check_index("document", doc, self.docs.len())?;
        check_index("topic", topic, self.config.num_topics)?;
        Ok(self.pz_d(doc, topic))
    }

    /// phi: the T x W matrix of `P(word | topic)`. Computed on every call.
    pub fn estimate_phi(&self) -> Vec<Vec<f64>> {
        (0..self.config.num_topics)
            .map(|t| (0..self.vocab.len()).map(|w| self.pw_z(w, t)).collect())
            .collect()
    }

    /// theta: the D x T matrix of `P(topic | document)`. Computed on every call.
    pub fn estimate_theta(&self) -> Vec<Vec<f64>> {
        (0..self.docs.len())
            .map(|d| (0..self.config.num_topics).map(|t| self.pz_d(d, t)).collect())
            .collect()
    }

    /// The `num_displayed` most probable words of every topic, best first.
    /// Order among equally probable words is not part of the contract.
    pub fn topic_keys(&self, num_displayed: usize) -> Vec<Vec<String>> {
        self.estimate_phi()
            .iter()
            .map(|row| {
                top_k(row, num_displayed)
                    .into_iter()
                    .map(|(w, _)| self.vocab.words()[w].clone())
                    .collect()
            })
            .collect()
    }

    /// For every document, its `num_displayed` most probable topics, minus any
    /// whose probability falls below `threshold`.
    pub fn doc_keys(&self, num_displayed: usize, threshold: f64) -> Vec<Vec<DocKey>> {
        self.estimate_theta()
            .iter()
            .map(|row| {
                top_k(row, num_displayed)
                    .into_iter()
                    .filter(|&(_, p)| p >= threshold)
                    .collect()
            })
            .collect()
    }

    /// The most likely topic of every occurrence in `doc`, with that topic's top words.
    ///
    /// This is a point-in-time read of the current counts. Unlike a resampling
    /// step it does NOT remove the occurrence's own assignment before scoring,
    /// so an occurrence leans towards the topic it already holds.
    pub fn doc_detail(&self, doc: DocId) -> Result<Vec<WordTopicDetail>> {
        check_index("document", doc, self.docs.len())?;
        let keys = self.topic_keys(DEFAULT_NUM_DISPLAYED);

        let detail = self.docs[doc]
            .iter()
            .enumerate()
            .map(|(position, token)| {
                let word = self.vocab.id(token).ok_or_else(|| {
                    LdaError::CorruptState(format!("token '{token}' missing from vocabulary"))
                })?;
                let (mut topic, mut best) = (0, 0.0);
                for t in 0..self.config.num_topics {
                    let f = self.conditional(doc, word, t);
                    if f > best {
                        best = f;
                        topic = t;
                    }
                }
                Ok(WordTopicDetail {
                    word: token.clone(),
                    position,
                    topic,
                    topic_words: keys[topic].clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(detail)
    }

    /// Unnormalized conditional weight of `topic` for `word` in `doc`:
    /// `(nwt[w][t] + beta) * (ndt[d][t] + alpha) / (nt[t] + W * beta)`.
    /// Reads the counts as they are; `sample` removes the occurrence first.
    #[inline]
    fn conditional(&self, doc: DocId, word: WordId, topic: TopicId) -> f64 {
        let SamplerConfig { alpha, beta, .. } = self.config;
        (self.counts.nwt(word, topic) as f64 + beta) * (self.counts.ndt(doc, topic) as f64 + alpha)
            / (self.counts.nt(topic) as f64 + self.vocab.len() as f64 * beta)
    }

    /// Read-only word -> index mapping, for external tokenizers and reporters.
    pub fn wordmap(&self) -> &HashMap<String, WordId> {
        self.vocab.mapping()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.docs
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn counts(&self) -> &CountTables {
        &self.counts
    }

    pub fn num_topics(&self) -> usize {
        self.config.num_topics
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }

    pub fn beta(&self) -> f64 {
        self.config.beta
    }
}
