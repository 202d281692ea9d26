// --- File: src/core/ranking.rs
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A probability tagged with the index it belongs to.
/// Orders by score, and on equal scores the lower index ranks higher.
#[derive(Debug, Clone, Copy)]
struct Scored {
    score: f64,
    index: usize,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Returns the `k` highest-scoring `(index, score)` pairs, best first.
/// O(n log k) using a bounded min-heap.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 {
        return vec![];
    }

    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (index, &score) in scores.iter().enumerate() {
        let entry = Reverse(Scored { score, index });
        if heap.len() < k {
            heap.push(entry);
        } else if let Some(min) = heap.peek() {
            if entry < *min {
                heap.pop();
                heap.push(entry);
            }
        }
    }

    // Sorting Reverse entries ascending yields the best entry first.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(s)| (s.index, s.score))
        .collect()
}
