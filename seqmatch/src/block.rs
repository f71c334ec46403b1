//! Matching block definition.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A run of `len` elements such that `a[self.a..self.a + len] == b[self.b..self.b + len]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchingBlock {
    /// Offset in the left-side sequence.
    pub a: usize,
    /// Offset in the right-side sequence.
    pub b: usize,
    /// Number of matched elements.
    pub len: usize,
}

impl MatchingBlock {
    /// Creates an instance.
    pub const fn new(a: usize, b: usize, len: usize) -> Self {
        Self { a, b, len }
    }

    /// Gets the exclusive end offset in the left-side sequence.
    pub const fn a_end(&self) -> usize {
        self.a + self.len
    }

    /// Gets the exclusive end offset in the right-side sequence.
    pub const fn b_end(&self) -> usize {
        self.b + self.len
    }

    /// Swaps the roles of the two sequences.
    pub const fn transposed(self) -> Self {
        Self::new(self.b, self.a, self.len)
    }

    /// Checks if `next` starts exactly where `self` ends in both sequences.
    pub const fn adjoins(&self, next: &Self) -> bool {
        self.a_end() == next.a && self.b_end() == next.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends() {
        let block = MatchingBlock::new(3, 7, 4);
        assert_eq!(block.a_end(), 7);
        assert_eq!(block.b_end(), 11);
        assert_eq!(block.transposed(), MatchingBlock::new(7, 3, 4));
    }

    #[test]
    fn test_adjoins() {
        let block = MatchingBlock::new(0, 2, 3);
        assert!(block.adjoins(&MatchingBlock::new(3, 5, 1)));
        assert!(!block.adjoins(&MatchingBlock::new(3, 6, 1)));
        assert!(!block.adjoins(&MatchingBlock::new(4, 5, 1)));
    }
}
