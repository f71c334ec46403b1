//! Symmetric similarity between two sequences.
use std::cmp::Ordering;
use std::hash::Hash;

use crate::block::MatchingBlock;
use crate::matcher::SequenceMatcher;

/// Outcome of [`match_sequences`].
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// Similarity ratio in `[0, 1]`.
    pub ratio: f64,
    /// Matching blocks in the caller's orientation, sorted by offsets.
    pub blocks: Vec<MatchingBlock>,
}

impl Match {
    /// Gets the total number of matched elements.
    pub fn matched(&self) -> usize {
        self.blocks.iter().map(|m| m.len).sum()
    }

    /// Gets the longest block, preferring the earliest one on ties.
    pub fn longest(&self) -> Option<MatchingBlock> {
        self.blocks
            .iter()
            .copied()
            .reduce(|best, m| if m.len > best.len { m } else { best })
    }
}

/// Computes `2 * matched / (len_a + len_b)`.
///
/// Two empty sequences are identical (1.0); one empty sequence matches nothing (0.0).
pub fn ratio(matched: usize, len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 1.;
    }
    2. * matched as f64 / total as f64
}

/// Matches two sequences and computes their similarity ratio.
///
/// The gestalt search is run in a canonical orientation (the shorter sequence on
/// the left, ties broken lexicographically) and the blocks are mapped back, so
/// `match_sequences(a, b)` and `match_sequences(b, a)` always agree on the ratio
/// and report the same blocks with their coordinates swapped.
pub fn match_sequences<T>(a: &[T], b: &[T]) -> Match
where
    T: Ord + Hash,
{
    let blocks = if is_canonical(a, b) {
        SequenceMatcher::new(a, b).matching_blocks()
    } else {
        SequenceMatcher::new(b, a)
            .matching_blocks()
            .into_iter()
            .map(MatchingBlock::transposed)
            .collect()
    };
    let matched = blocks.iter().map(|m| m.len).sum();
    Match {
        ratio: ratio(matched, a.len(), b.len()),
        blocks,
    }
}

fn is_canonical<T: Ord>(a: &[T], b: &[T]) -> bool {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b)) != Ordering::Greater
}
