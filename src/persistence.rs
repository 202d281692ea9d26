// File: src/persistence.rs
//! Typed snapshots of a sampler's full state, with bincode files and JSON strings.

use crate::config::SamplerConfig;
use crate::core::counts::CountTables;
use crate::core::engine::LdaSampler;
use crate::core::types::Assignment;
use crate::core::vocabulary::Vocabulary;
use crate::error::{LdaError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to restore a sampler exactly: dimensions,
/// hyperparameters, vocabulary, corpus, the four count tables and every
/// assignment. The random generator is not part of the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub num_topics: usize,
    pub num_docs: usize,
    pub vocab_size: usize,
    pub alpha: f64,
    pub beta: f64,
    pub vocab: Vec<String>,
    pub docs: Vec<Vec<String>>,
    pub nt: Vec<usize>,
    pub nd: Vec<usize>,
    pub nwt: Vec<Vec<usize>>,
    pub ndt: Vec<Vec<usize>>,
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn corrupt(msg: impl Into<String>) -> LdaError {
    LdaError::CorruptState(msg.into())
}

impl<R> LdaSampler<R> {
    /// Captures the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            num_topics: self.config.num_topics,
            num_docs: self.docs.len(),
            vocab_size: self.vocab.len(),
            alpha: self.config.alpha,
            beta: self.config.beta,
            vocab: self.vocab.words().to_vec(),
            docs: self.docs.clone(),
            nt: self.counts.topic_totals().to_vec(),
            nd: self.counts.doc_lengths().to_vec(),
            nwt: self.counts.word_topic_rows(),
            ndt: self.counts.doc_topic_rows(),
            assignments: self.assignments.clone(),
        }
    }

    /// Restores a sampler from a snapshot after checking that its dimensions,
    /// vocabulary, corpus, assignments and counts all agree.
    pub fn from_snapshot(snapshot: Snapshot, rng: R) -> Result<Self> {
        let Snapshot {
            version,
            num_topics,
            num_docs,
            vocab_size,
            alpha,
            beta,
            vocab,
            docs,
            nt,
            nd,
            nwt,
            ndt,
            assignments,
        } = snapshot;

        if version != SNAPSHOT_VERSION {
            return Err(corrupt(format!(
                "unsupported snapshot version {version}, expected {SNAPSHOT_VERSION}"
            )));
        }
        let config = SamplerConfig::new(num_topics, alpha, beta);
        config.validate().map_err(|e| corrupt(e.to_string()))?;

        if docs.len() != num_docs || nd.len() != num_docs {
            return Err(corrupt(format!(
                "expected {num_docs} documents, found {} documents and {} lengths",
                docs.len(),
                nd.len()
            )));
        }
        if vocab.len() != vocab_size || nwt.len() != vocab_size {
            return Err(corrupt(format!(
                "expected {vocab_size} words, found {} words and {} count rows",
                vocab.len(),
                nwt.len()
            )));
        }
        let vocab = Vocabulary::from_words(vocab).ok_or_else(|| corrupt("duplicate vocabulary word"))?;

        for (d, (words, &len)) in docs.iter().zip(&nd).enumerate() {
            if words.len() != len {
                return Err(corrupt(format!("document {d} has {} words but nd says {len}", words.len())));
            }
        }

        let occurrences: Vec<(usize, usize, &String)> = docs
            .iter()
            .enumerate()
            .flat_map(|(d, words)| words.iter().enumerate().map(move |(i, w)| (d, i, w)))
            .collect();
        if occurrences.is_empty() {
            return Err(corrupt("snapshot corpus has no words"));
        }
        if occurrences.len() != assignments.len() {
            return Err(corrupt(format!(
                "{} word occurrences but {} assignments",
                occurrences.len(),
                assignments.len()
            )));
        }
        for (k, (z, &(d, i, token))) in assignments.iter().zip(&occurrences).enumerate() {
            if z.doc != d || z.position != i {
                return Err(corrupt(format!(
                    "assignment {k} is for ({}, {}), expected ({d}, {i})",
                    z.doc, z.position
                )));
            }
            if vocab.word(z.word) != Some(token.as_str()) {
                return Err(corrupt(format!("assignment {k} word id {} does not match '{token}'", z.word)));
            }
            if z.topic >= num_topics {
                return Err(corrupt(format!("assignment {k} has topic {} of {num_topics}", z.topic)));
            }
        }

        let declared = CountTables::from_rows(num_topics, nt, nd, nwt, ndt)
            .ok_or_else(|| corrupt("count table dimensions do not match"))?;
        let recomputed = CountTables::from_assignments(
            declared.doc_lengths().to_vec(),
            vocab_size,
            num_topics,
            &assignments,
        );
        if declared != recomputed {
            return Err(corrupt("count tables disagree with assignments"));
        }
        if let Some(w) = (0..vocab_size).find(|&w| declared.word_topic_row(w).iter().sum::<usize>() == 0) {
            return Err(corrupt(format!(
                "vocabulary word '{}' does not occur in the corpus",
                vocab.words()[w]
            )));
        }

        Ok(Self {
            config,
            docs,
            vocab,
            counts: declared,
            assignments,
            rng,
            weights: vec![0.0; num_topics],
        })
    }
}

/// Writes a bincode snapshot, replacing `path` atomically.
pub fn save_to_disk<R>(sampler: &LdaSampler<R>, path: &Path) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let snapshot = sampler.snapshot();

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| e.error)?;
    info!(
        "saved sampler snapshot ({} assignments) to {}",
        snapshot.assignments.len(),
        path.display()
    );
    Ok(())
}

/// Reads a snapshot written by `save_to_disk` and restores it with `rng`.
pub fn load_from_disk<R>(path: &Path, rng: R) -> Result<LdaSampler<R>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    let sampler = LdaSampler::from_snapshot(snapshot, rng)?;
    info!(
        "loaded sampler snapshot ({} assignments) from {}",
        sampler.assignments().len(),
        path.display()
    );
    Ok(sampler)
}
