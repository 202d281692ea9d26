// src/lib.rs
//! Topic discovery with collapsed Gibbs sampling for Latent Dirichlet Allocation.
//!
//! ```
//! use lda_core::{LdaSampler, SamplerConfig, Tokenizer, WhitespaceTokenizer};
//!
//! let docs = WhitespaceTokenizer.tokenize_all(&["cat cat cat", "cat dog rabbit"]);
//! let mut lda = LdaSampler::with_seed(docs, SamplerConfig::new(2, 0.5, 0.5), 42)
//!     .expect("valid corpus and config");
//! lda.run(10);
//!
//! let keys = lda.topic_keys(3);
//! assert_eq!(keys.len(), 2);
//! assert!(lda.doc_keys(5, 1.1).iter().all(Vec::is_empty));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod report;
pub mod tokenizer;

pub use crate::config::SamplerConfig;
pub use crate::core::engine::{LdaSampler, DEFAULT_DOC_KEY_THRESHOLD, DEFAULT_NUM_DISPLAYED};
pub use crate::core::types::{Assignment, DocId, DocKey, TopicId, WordId, WordTopicDetail};
pub use crate::error::{LdaError, Result};
pub use crate::persistence::{load_from_disk, save_to_disk, Snapshot};
pub use crate::tokenizer::{Tokenizer, WhitespaceTokenizer};
