// File: src/config.rs
//! Sampler configuration: topic count and Dirichlet hyperparameters.

use crate::error::{LdaError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Configuration for a collapsed Gibbs LDA sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of topics T. Must be at least 1.
    pub num_topics: usize,
    /// Document-topic smoothing. Must be positive.
    pub alpha: f64,
    /// Topic-word smoothing. Must be positive.
    pub beta: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            num_topics: 10,
            alpha: 0.1,
            beta: 0.1,
        }
    }
}

impl SamplerConfig {
    pub fn new(num_topics: usize, alpha: f64, beta: f64) -> Self {
        Self { num_topics, alpha, beta }
    }

    #[must_use]
    pub fn with_num_topics(mut self, num_topics: usize) -> Self {
        self.num_topics = num_topics;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Checks the topic count and both hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if self.num_topics < 1 {
            return Err(LdaError::InvalidConfiguration(
                "num_topics must be at least 1".to_string(),
            ));
        }
        validate_hyperparameter("alpha", self.alpha)?;
        validate_hyperparameter("beta", self.beta)
    }

    /// Loads a JSON config file. Missing fields fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SamplerConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_hyperparameter(name: &str, value: f64) -> Result<()> {
    // NaN fails this comparison too.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LdaError::InvalidConfiguration(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        let config = SamplerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.beta, 0.1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(SamplerConfig::new(0, 0.5, 0.5).validate().is_err());
        assert!(SamplerConfig::new(2, 0.0, 0.5).validate().is_err());
        assert!(SamplerConfig::new(2, 0.5, -1.0).validate().is_err());
        assert!(SamplerConfig::new(2, f64::NAN, 0.5).validate().is_err());
        assert!(SamplerConfig::new(2, 0.5, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn builder_setters() {
        let config = SamplerConfig::default()
            .with_num_topics(4)
            .with_alpha(0.5)
            .with_beta(0.01);
        assert_eq!(config, SamplerConfig::new(4, 0.5, 0.01));
    }

    #[test]
    fn loads_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_topics": 3, "alpha": 0.5}}"#).unwrap();
        let config = SamplerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.num_topics, 3);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.beta, 0.1);
    }

    #[test]
    fn json_file_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_topics": 0}}"#).unwrap();
        let err = SamplerConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, LdaError::InvalidConfiguration(_)));
    }
}
