//! Pairwise document comparison.
use seqmatch::{match_sequences, Match};

use crate::config::{EngineConfig, Granularity};
use crate::document::Document;
use crate::normalize::{NormalizedText, Normalizer};
use crate::result::{ComparisonFailure, EmptySide, FailureKind, SimilarityResult};

/// Compares two documents.
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    normalizer: Normalizer,
    granularity: Granularity,
    keeps_blocks: bool,
}

impl Comparator {
    /// Creates an instance comparing characters of the normalized text.
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            granularity: Granularity::Char,
            keeps_blocks: false,
        }
    }

    /// Creates an instance from options.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Normalizer::from_config(&config.normalizer))
            .granularity(config.granularity)
            .keeps_blocks(config.keep_blocks)
    }

    /// Sets the unit of the matched sequences.
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Keeps the matching blocks in the results?
    pub const fn keeps_blocks(mut self, yes: bool) -> Self {
        self.keeps_blocks = yes;
        self
    }

    /// Gets the normalizer.
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Compares `a` and `b`.
    ///
    /// Fails with [`FailureKind::EmptyContent`] if either document has no text
    /// left after normalization. The ratio is symmetric: swapping the
    /// arguments swaps the identifiers but not the ratio.
    pub fn compare(
        &self,
        a: &Document,
        b: &Document,
    ) -> Result<SimilarityResult, ComparisonFailure> {
        let text_a = self.normalizer.normalize(&a.content);
        let text_b = self.normalizer.normalize(&b.content);
        if let Some(side) = EmptySide::of(text_a.is_empty(), text_b.is_empty()) {
            return Err(ComparisonFailure::new(
                a,
                b,
                FailureKind::EmptyContent { side },
            ));
        }

        let m = self.match_texts(&text_a, &text_b);
        debug_assert!((0. ..=1.).contains(&m.ratio));
        Ok(SimilarityResult {
            doc_a_id: a.id,
            doc_b_id: b.id,
            doc_a_name: a.name.clone(),
            doc_b_name: b.name.clone(),
            ratio: m.ratio,
            matched: m.matched(),
            longest_block: m.longest().map_or(0, |block| block.len),
            granularity: self.granularity,
            blocks: if self.keeps_blocks { m.blocks } else { vec![] },
        })
    }

    fn match_texts(&self, a: &NormalizedText, b: &NormalizedText) -> Match {
        match self.granularity {
            Granularity::Char => match_sequences(&a.chars(), &b.chars()),
            Granularity::Token => match_sequences(a.tokens(), b.tokens()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use seqmatch::MatchingBlock;

    use crate::normalize::RichTokenizer;

    #[test]
    fn test_identical() {
        let comparator = Comparator::default();
        let a = Document::new(1, "a", "The cat sat");
        let b = Document::new(2, "b", "the  CAT sat");
        let result = comparator.compare(&a, &b).unwrap();
        assert_eq!(result.ratio, 1.);
        assert_eq!(result.doc_a_id, 1);
        assert_eq!(result.doc_b_name, "b");
        // "cat sat"
        assert_eq!(result.matched, 7);
        assert_eq!(result.longest_block, 7);
        assert!(result.blocks.is_empty());
    }

    #[test]
    fn test_char_ratio() {
        let comparator = Comparator::new(Normalizer::basic()).keeps_blocks(true);
        let a = Document::new(1, "a", "qabxcd");
        let b = Document::new(2, "b", "abycdf");
        let result = comparator.compare(&a, &b).unwrap();
        assert_eq!(result.ratio, 8. / 12.);
        assert_eq!(
            result.blocks,
            vec![MatchingBlock::new(1, 0, 2), MatchingBlock::new(4, 3, 2)]
        );
        assert_eq!(result.summary(), "Longest matching block: 2 characters");
    }

    #[test]
    fn test_token_ratio() {
        let comparator = Comparator::new(Normalizer::basic()).granularity(Granularity::Token);
        let a = Document::new(1, "a", "alpha beta gamma delta");
        let b = Document::new(2, "b", "alpha beta epsilon delta");
        let result = comparator.compare(&a, &b).unwrap();
        assert_eq!(result.ratio, 6. / 8.);
        assert_eq!(result.matched, 3);
        assert_eq!(result.longest_block, 2);
        assert_eq!(result.summary(), "Longest matching block: 2 tokens");
    }

    #[test]
    fn test_symmetric() {
        let comparator = Comparator::default();
        let a = Document::new(1, "a", "Rust is a systems programming language");
        let b = Document::new(2, "b", "Go is a programming language for systems");
        let ab = comparator.compare(&a, &b).unwrap();
        let ba = comparator.compare(&b, &a).unwrap();
        assert_eq!(ab.ratio, ba.ratio);
        assert_eq!(ab.matched, ba.matched);
        assert_eq!((ba.doc_a_id, ba.doc_b_id), (2, 1));
        assert!(ab.ratio > 0. && ab.ratio < 1.);
    }

    #[test]
    fn test_empty_content() {
        let comparator = Comparator::default();
        let empty = Document::new(1, "empty", "");
        let text = Document::new(2, "text", "some words");
        let failure = comparator.compare(&empty, &text).unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::EmptyContent {
                side: EmptySide::A
            }
        );
        assert_eq!((failure.doc_a_id, failure.doc_b_id), (1, 2));

        let failure = comparator.compare(&text, &empty).unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::EmptyContent {
                side: EmptySide::B
            }
        );

        let failure = comparator.compare(&empty, &empty).unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::EmptyContent {
                side: EmptySide::Both
            }
        );
    }

    #[test]
    fn test_empty_after_normalization() {
        let comparator = Comparator::new(Normalizer::new(RichTokenizer::english()));
        let stopwords_only = Document::new(1, "a", "The and of -- !!");
        let text = Document::new(2, "b", "The cat");
        assert!(comparator.compare(&stopwords_only, &text).is_err());
        assert!(comparator.compare(&stopwords_only, &stopwords_only).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            granularity: Granularity::Token,
            keep_blocks: true,
            ..Default::default()
        };
        let comparator = Comparator::from_config(&config);
        let a = Document::new(1, "a", "dog ran fast");
        let b = Document::new(2, "b", "dog ran slow");
        let result = comparator.compare(&a, &b).unwrap();
        assert_eq!(result.granularity, Granularity::Token);
        assert_eq!(result.blocks, vec![MatchingBlock::new(0, 0, 2)]);
    }
}
