// File: src/report.rs
//! Plain-text rendering of the sampler's query results. Nothing here reads
//! sampler internals; every function takes the structured output of a query.

use crate::core::types::{Assignment, DocKey, WordTopicDetail};

/// Topics of the first `n` assignments, e.g. `[0 1] [1 1]` for `n = 4`.
/// Topics are grouped in pairs.
pub fn format_assignment_trace(assignments: &[Assignment], n: usize) -> String {
    assignments
        .iter()
        .take(n)
        .map(|z| z.topic.to_string())
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|pair| format!("[{}]", pair.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per topic: `<topic> [w1, w2, ...]`.
pub fn format_topic_keys(keys: &[Vec<String>]) -> String {
    let mut out = String::new();
    for (topic, words) in keys.iter().enumerate() {
        out.push_str(&format!("{topic} [{}]\n", words.join(", ")));
    }
    out
}

/// One line per document: `<doc text> [(p, topic), ...]`.
pub fn format_doc_keys<S: AsRef<str>>(docs: &[S], keys: &[Vec<DocKey>]) -> String {
    let mut out = String::new();
    for (doc, dk) in docs.iter().zip(keys) {
        let entries: Vec<String> = dk.iter().map(|&(t, p)| format!("({p:.4}, {t})")).collect();
        out.push_str(&format!("{} [{}]\n", doc.as_ref(), entries.join(", ")));
    }
    out
}

/// One line per occurrence: `<word> \t <topic> <top words>`.
pub fn format_doc_detail(detail: &[WordTopicDetail]) -> String {
    let mut out = String::new();
    for entry in detail {
        out.push_str(&format!("{} \t {} {}\n", entry.word, entry.topic, entry.topic_words.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(topic: usize) -> Assignment {
        Assignment { doc: 0, position: 0, word: 0, topic }
    }

    #[test]
    fn trace_pairs_topics() {
        let zs = [z(0), z(1), z(1), z(1), z(0)];
        assert_eq!(format_assignment_trace(&zs, 4), "[0 1] [1 1]");
        assert_eq!(format_assignment_trace(&zs, 3), "[0 1] [1]");
        assert_eq!(format_assignment_trace(&zs, 0), "");
    }

    #[test]
    fn topic_key_lines() {
        let keys = vec![vec!["cat".to_string(), "dog".to_string()], vec!["rabbit".to_string()]];
        assert_eq!(format_topic_keys(&keys), "0 [cat, dog]\n1 [rabbit]\n");
    }

    #[test]
    fn doc_key_lines() {
        let text = format_doc_keys(&["cat cat cat", "cat dog"], &[vec![(1, 0.75)], vec![]]);
        assert_eq!(text, "cat cat cat [(0.7500, 1)]\ncat dog []\n");
    }

    #[test]
    fn detail_lines() {
        let detail = vec![WordTopicDetail {
            word: "cat".to_string(),
            position: 0,
            topic: 1,
            topic_words: vec!["cat".to_string(), "dog".to_string()],
        }];
        assert_eq!(format_doc_detail(&detail), "cat \t 1 cat dog\n");
    }
}
