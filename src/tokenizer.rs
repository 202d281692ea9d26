// File: src/tokenizer.rs
//! Turns raw document strings into the token sequences the sampler consumes.

/// Trait for tokenization. Plug in your own implementation.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Tokenizes every document, keeping corpus order.
    fn tokenize_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<Vec<String>> {
        docs.iter().map(|d| self.tokenize(d.as_ref())).collect()
    }
}

/// Splits on runs of whitespace and drops empty tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let tokens = WhitespaceTokenizer.tokenize("  cat dog\trabbit\n");
        assert_eq!(tokens, ["cat", "dog", "rabbit"]);
        assert!(WhitespaceTokenizer.tokenize("   ").is_empty());
    }

    #[test]
    fn keeps_document_order() {
        let docs = WhitespaceTokenizer.tokenize_all(&["cat cat cat", "cat dog rabbit"]);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0], ["cat", "cat", "cat"]);
        assert_eq!(docs[1], ["cat", "dog", "rabbit"]);
    }
}
