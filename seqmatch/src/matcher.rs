//! Orientation-dependent longest-match search.
use std::hash::Hash;

use hashbrown::HashMap;

use crate::block::MatchingBlock;

/// Matcher over a fixed pair of sequences `a` and `b`.
///
/// Construction indexes the positions of every element of `b`, so repeated
/// longest-match queries only visit positions that can actually match.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Eq + Hash,
{
    /// Creates an instance for the left-side sequence `a` and the right-side sequence `b`.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, x) in b.iter().enumerate() {
            b2j.entry(x).or_insert_with(Vec::new).push(j);
        }
        Self { a, b, b2j }
    }

    /// Gets the left-side sequence.
    pub const fn a(&self) -> &'a [T] {
        self.a
    }

    /// Gets the right-side sequence.
    pub const fn b(&self) -> &'a [T] {
        self.b
    }

    /// Finds the longest run shared by `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Among runs of the maximum length, the one starting earliest in `a` wins,
    /// and among those the one starting earliest in `b`.
    /// If nothing matches, a block of length 0 at `(a_lo, b_lo)` is returned.
    ///
    /// # Panics
    ///
    /// Panics if a range is reversed or exceeds its sequence.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        assert!(a_lo <= a_hi && a_hi <= self.a.len());
        assert!(b_lo <= b_hi && b_hi <= self.b.len());

        let mut best = MatchingBlock::new(a_lo, b_lo, 0);
        // j2len[j] is the length of the run ending at a[i - 1] and b[j].
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();

        for i in a_lo..a_hi {
            new_j2len.clear();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                let start = positions.partition_point(|&j| j < b_lo);
                for &j in &positions[start..] {
                    if j >= b_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .map_or(1, |&len| len + 1);
                    new_j2len.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut new_j2len);
        }
        best
    }

    /// Collects all matching blocks, sorted by their offsets.
    ///
    /// Windows are processed from an explicit work-list, so the stack depth does
    /// not grow with the number of blocks. Blocks that adjoin in both sequences
    /// are merged, so every returned block is maximal.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = vec![];

        while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
            let m = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if m.len == 0 {
                continue;
            }
            if a_lo < m.a && b_lo < m.b {
                queue.push((a_lo, m.a, b_lo, m.b));
            }
            if m.a_end() < a_hi && m.b_end() < b_hi {
                queue.push((m.a_end(), a_hi, m.b_end(), b_hi));
            }
            blocks.push(m);
        }

        blocks.sort_unstable();
        collapse_adjoining(blocks)
    }

    /// Computes the similarity ratio in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let matched = self.matching_blocks().iter().map(|m| m.len).sum();
        crate::ratio(matched, self.a.len(), self.b.len())
    }
}

fn collapse_adjoining(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if last.adjoins(&block) => last.len += block.len,
            _ => merged.push(block),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn naive_longest_match<T: Eq>(
        a: &[T],
        b: &[T],
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        let mut best = MatchingBlock::new(a_lo, b_lo, 0);
        for i in a_lo..a_hi {
            for j in b_lo..b_hi {
                let mut k = 0;
                while i + k < a_hi && j + k < b_hi && a[i + k] == b[j + k] {
                    k += 1;
                }
                if k > best.len {
                    best = MatchingBlock::new(i, j, k);
                }
            }
        }
        best
    }

    #[test]
    fn test_find_longest_match() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.find_longest_match(0, 5, 0, 9),
            MatchingBlock::new(0, 4, 5)
        );
        assert_eq!(
            matcher.find_longest_match(1, 5, 0, 4),
            MatchingBlock::new(1, 0, 4)
        );
    }

    #[test]
    fn test_find_longest_match_ties() {
        let a = chars("ab");
        let b = chars("ba");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.find_longest_match(0, 2, 0, 2),
            MatchingBlock::new(0, 1, 1)
        );

        let a = chars("a");
        let b = chars("aa");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.find_longest_match(0, 1, 0, 2),
            MatchingBlock::new(0, 0, 1)
        );
    }

    #[test]
    fn test_find_longest_match_none() {
        let a = chars("abc");
        let b = chars("xyz");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.find_longest_match(1, 3, 2, 3),
            MatchingBlock::new(1, 2, 0)
        );
    }

    #[test]
    fn test_find_longest_match_against_naive() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..200 {
            let a: Vec<u8> = (0..rng.gen_range(0..30)).map(|_| rng.gen_range(0..3)).collect();
            let b: Vec<u8> = (0..rng.gen_range(0..30)).map(|_| rng.gen_range(0..3)).collect();
            let a_lo = rng.gen_range(0..=a.len());
            let a_hi = rng.gen_range(a_lo..=a.len());
            let b_lo = rng.gen_range(0..=b.len());
            let b_hi = rng.gen_range(b_lo..=b.len());
            let matcher = SequenceMatcher::new(&a, &b);
            assert_eq!(
                matcher.find_longest_match(a_lo, a_hi, b_lo, b_hi),
                naive_longest_match(&a, &b, a_lo, a_hi, b_lo, b_hi)
            );
        }
    }

    #[test]
    fn test_matching_blocks() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.matching_blocks(),
            vec![MatchingBlock::new(0, 0, 2), MatchingBlock::new(3, 2, 2)]
        );

        let a = chars("qabxcd");
        let b = chars("abycdf");
        let matcher = SequenceMatcher::new(&a, &b);
        assert_eq!(
            matcher.matching_blocks(),
            vec![MatchingBlock::new(1, 0, 2), MatchingBlock::new(4, 3, 2)]
        );
        assert_eq!(matcher.ratio(), 8. / 12.);
    }

    #[test]
    fn test_matching_blocks_disjoint() {
        let a: Vec<u32> = (0..1000).collect();
        let b: Vec<u32> = (1000..2000).collect();
        let matcher = SequenceMatcher::new(&a, &b);
        assert!(matcher.matching_blocks().is_empty());
        assert_eq!(matcher.ratio(), 0.);
    }

    #[test]
    fn test_matching_blocks_interleaved() {
        // Every other element matches, forcing one window per block.
        let a: Vec<u32> = (0..2000).collect();
        let b: Vec<u32> = (0..2000).map(|x| if x % 2 == 0 { x } else { x + 10_000 }).collect();
        let matcher = SequenceMatcher::new(&a, &b);
        let blocks = matcher.matching_blocks();
        assert_eq!(blocks.len(), 1000);
        assert!(blocks.iter().all(|m| m.len == 1 && m.a == m.b));
    }

    #[test]
    fn test_matching_blocks_are_ordered() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..200 {
            let a: Vec<u8> = (0..rng.gen_range(0..40)).map(|_| rng.gen_range(0..4)).collect();
            let b: Vec<u8> = (0..rng.gen_range(0..40)).map(|_| rng.gen_range(0..4)).collect();
            let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
            for m in &blocks {
                assert!(m.len > 0);
                assert_eq!(a[m.a..m.a_end()], b[m.b..m.b_end()]);
            }
            for w in blocks.windows(2) {
                assert!(w[0].a_end() <= w[1].a);
                assert!(w[0].b_end() <= w[1].b);
                assert!(!w[0].adjoins(&w[1]));
            }
        }
    }

    #[test]
    fn test_collapse_adjoining() {
        let blocks = vec![
            MatchingBlock::new(0, 0, 2),
            MatchingBlock::new(2, 2, 1),
            MatchingBlock::new(4, 3, 1),
        ];
        assert_eq!(
            collapse_adjoining(blocks),
            vec![MatchingBlock::new(0, 0, 3), MatchingBlock::new(4, 3, 1)]
        );
    }

    #[test]
    #[should_panic]
    fn test_invalid_range() {
        let a = chars("abc");
        let b = chars("abc");
        SequenceMatcher::new(&a, &b).find_longest_match(0, 4, 0, 3);
    }
}
