//! Outcomes of pairwise and batch comparisons.
use std::fmt;

use seqmatch::MatchingBlock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Granularity;
use crate::document::{DocId, Document};

/// Similarity of two documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Identifier of the left-side document.
    pub doc_a_id: DocId,
    /// Identifier of the right-side document.
    pub doc_b_id: DocId,
    /// Name of the left-side document.
    pub doc_a_name: String,
    /// Name of the right-side document.
    pub doc_b_name: String,
    /// Similarity ratio in `[0, 1]`.
    pub ratio: f64,
    /// Total length of all matching blocks.
    pub matched: usize,
    /// Length of the longest matching block.
    pub longest_block: usize,
    /// Unit in which `matched` and `longest_block` are counted.
    pub granularity: Granularity,
    /// Matching blocks, kept only when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<MatchingBlock>,
}

impl SimilarityResult {
    /// Describes the longest matching block.
    pub fn summary(&self) -> String {
        if self.longest_block == 0 {
            return "No significant matches found".to_string();
        }
        let unit = match self.granularity {
            Granularity::Char => "characters",
            Granularity::Token => "tokens",
        };
        format!("Longest matching block: {} {unit}", self.longest_block)
    }
}

/// Which side of a pair had no comparable text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySide {
    /// The left-side document.
    A,
    /// The right-side document.
    B,
    /// Both documents.
    Both,
}

impl EmptySide {
    pub(crate) const fn of(a_empty: bool, b_empty: bool) -> Option<Self> {
        match (a_empty, b_empty) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::A),
            (false, true) => Some(Self::B),
            (false, false) => None,
        }
    }
}

/// Reason a pair could not be compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Raw content was empty or no token survived normalization.
    EmptyContent {
        /// Side(s) without text.
        side: EmptySide,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyContent { side: EmptySide::Both } => {
                f.write_str("both documents contain no extractable text")
            }
            Self::EmptyContent { .. } => {
                f.write_str("one of the documents contains no extractable text")
            }
        }
    }
}

/// A pair that could not be compared.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("cannot compare {doc_a_name} and {doc_b_name}: {kind}")]
pub struct ComparisonFailure {
    /// Identifier of the left-side document.
    pub doc_a_id: DocId,
    /// Identifier of the right-side document.
    pub doc_b_id: DocId,
    /// Name of the left-side document.
    pub doc_a_name: String,
    /// Name of the right-side document.
    pub doc_b_name: String,
    /// Reason of the failure.
    #[serde(flatten)]
    pub kind: FailureKind,
}

impl ComparisonFailure {
    pub(crate) fn new(a: &Document, b: &Document, kind: FailureKind) -> Self {
        Self {
            doc_a_id: a.id,
            doc_b_id: b.id,
            doc_a_name: a.name.clone(),
            doc_b_name: b.name.clone(),
            kind,
        }
    }
}

/// Outcome of one pair within a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    /// The pair was compared.
    Similar(SimilarityResult),
    /// The pair could not be compared.
    Failed(ComparisonFailure),
}

impl PairOutcome {
    /// Gets the ratio used for ranking; failures rank as 0.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Similar(r) => r.ratio,
            Self::Failed(_) => 0.,
        }
    }

    /// Gets the identifiers of both documents.
    pub fn ids(&self) -> (DocId, DocId) {
        match self {
            Self::Similar(r) => (r.doc_a_id, r.doc_b_id),
            Self::Failed(f) => (f.doc_a_id, f.doc_b_id),
        }
    }

    /// Gets the result if the pair was compared.
    pub const fn as_similar(&self) -> Option<&SimilarityResult> {
        match self {
            Self::Similar(r) => Some(r),
            Self::Failed(_) => None,
        }
    }

    /// Gets the failure if the pair could not be compared.
    pub const fn as_failed(&self) -> Option<&ComparisonFailure> {
        match self {
            Self::Similar(_) => None,
            Self::Failed(f) => Some(f),
        }
    }
}

impl From<Result<SimilarityResult, ComparisonFailure>> for PairOutcome {
    fn from(result: Result<SimilarityResult, ComparisonFailure>) -> Self {
        match result {
            Ok(r) => Self::Similar(r),
            Err(f) => Self::Failed(f),
        }
    }
}

/// Pair outcomes ranked by descending ratio.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    entries: Vec<PairOutcome>,
}

impl BatchResult {
    /// Ranks outcomes by descending ratio.
    ///
    /// The sort is stable: outcomes with equal ratios, including all failures,
    /// keep the order in which they were given.
    pub fn ranked(mut entries: Vec<PairOutcome>) -> Self {
        entries.sort_by(|x, y| y.ratio().total_cmp(&x.ratio()));
        Self { entries }
    }

    /// Gets the ranked outcomes.
    pub fn entries(&self) -> &[PairOutcome] {
        &self.entries
    }

    /// Gets the number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no pair was evaluated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the compared pairs in rank order.
    pub fn successes(&self) -> impl Iterator<Item = &SimilarityResult> {
        self.entries.iter().filter_map(PairOutcome::as_similar)
    }

    /// Iterates over the failed pairs in rank order.
    pub fn failures(&self) -> impl Iterator<Item = &ComparisonFailure> {
        self.entries.iter().filter_map(PairOutcome::as_failed)
    }

    /// Consumes the result, returning the ranked outcomes.
    pub fn into_entries(self) -> Vec<PairOutcome> {
        self.entries
    }
}

impl IntoIterator for BatchResult {
    type Item = PairOutcome;
    type IntoIter = std::vec::IntoIter<PairOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a PairOutcome;
    type IntoIter = std::slice::Iter<'a, PairOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
