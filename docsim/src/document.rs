//! Document values handed to the engine.
use serde::{Deserialize, Serialize};

/// Identifier assigned to a document by its store.
pub type DocId = u64;

/// A named piece of extracted text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocId,
    /// Display name, typically the source file name.
    pub name: String,
    /// Raw extracted text (may be empty).
    pub content: String,
}

impl Document {
    /// Creates an instance.
    pub fn new<N, C>(id: DocId, name: N, content: C) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            content: content.into(),
        }
    }
}
