//! Error definitions.
use std::path::PathBuf;
use std::{io, result};

use thiserror::Error;

use crate::document::DocId;
use crate::result::ComparisonFailure;

/// A specialized Result type for this library.
pub type Result<T, E = DocsimError> = result::Result<T, E>;

/// Errors in this library.
///
/// Request-level variants abort a call before any pair is compared.
/// Per-pair failures inside a batch are recorded in the result instead.
#[derive(Debug, Error)]
pub enum DocsimError {
    /// A requested identifier is not in the document collection.
    #[error("document with id {0} not found")]
    DocumentNotFound(DocId),

    /// Fewer than two documents are available for comparison.
    #[error("{}", insufficient_documents(.available))]
    InsufficientDocuments {
        /// Number of documents that were available.
        available: usize,
    },

    /// Fewer than two distinct documents were selected for comparison.
    #[error("please select at least 2 documents to compare ({selected} selected)")]
    InsufficientSelection {
        /// Number of distinct documents that were selected.
        selected: usize,
    },

    /// A single-pair comparison failed.
    #[error(transparent)]
    Comparison(#[from] ComparisonFailure),

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A document store file could not be encoded or decoded.
    #[error("malformed document store {}: {source}", .path.display())]
    Json {
        /// Store file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DocsimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

fn insufficient_documents(available: &usize) -> &'static str {
    match available {
        0 => "no documents found; add documents first",
        _ => "insufficient documents; add at least one more document to perform comparison",
    }
}
