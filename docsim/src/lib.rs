//! Ranked pairwise similarity of text documents.
//!
//! Documents are normalized into lowercase alphanumeric tokens, compared with
//! Ratcliff/Obershelp gestalt matching, and ranked by their similarity ratio.
//!
//! ```
//! use docsim::{BatchComparator, Document};
//!
//! let documents = vec![
//!     Document::new(1, "a.txt", "The cat sat on the mat"),
//!     Document::new(2, "b.txt", "the cat sat on the mat"),
//!     Document::new(3, "c.txt", "A dog ran fast"),
//! ];
//! let results = BatchComparator::default().compare_all(&documents).unwrap();
//! assert_eq!(results.len(), 3);
//! assert_eq!(results.entries()[0].ratio(), 1.0);
//! ```
#![deny(missing_docs)]

pub mod batch;
pub mod compare;
pub mod config;
pub mod document;
pub mod errors;
pub mod normalize;
pub mod result;
pub mod store;

mod stopwords;

pub use batch::{BatchComparator, TargetReport};
pub use compare::Comparator;
pub use config::{EngineConfig, Granularity, NormalizerConfig};
pub use document::{DocId, Document};
pub use errors::{DocsimError, Result};
pub use normalize::{BasicTokenizer, NormalizedText, Normalizer, RichTokenizer, Tokenizer};
pub use result::{
    BatchResult, ComparisonFailure, EmptySide, FailureKind, PairOutcome, SimilarityResult,
};
pub use store::{DocumentStore, JsonStore, MemoryStore, StoredDocument};
