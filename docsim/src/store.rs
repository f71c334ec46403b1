//! Persistence of document records.
//!
//! The comparison engine never calls into a store: callers take a snapshot with
//! [`DocumentStore::get_all`] and hand it to a [`crate::BatchComparator`].
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::errors::{DocsimError, Result};

/// A document together with its bookkeeping fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The document itself.
    #[serde(flatten)]
    pub document: Document,
    /// Seconds since the Unix epoch at insertion.
    pub added_at: u64,
}

/// Collection of documents addressed by identifier.
pub trait DocumentStore {
    /// Lists all records in insertion order.
    fn list(&self) -> Result<Vec<StoredDocument>>;

    /// Inserts a document, returning its newly assigned identifier.
    fn insert(&mut self, name: &str, content: &str) -> Result<DocId>;

    /// Removes a document, returning it.
    fn remove(&mut self, id: DocId) -> Result<Document>;

    /// Gets all documents in insertion order.
    fn get_all(&self) -> Result<Vec<Document>> {
        Ok(self.list()?.into_iter().map(|r| r.document).collect())
    }

    /// Gets the document identified by `id`.
    fn get(&self, id: DocId) -> Result<Document> {
        self.get_all()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(DocsimError::DocumentNotFound(id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Records {
    next_id: DocId,
    documents: Vec<StoredDocument>,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            next_id: 1,
            documents: vec![],
        }
    }
}

impl Records {
    fn insert(&mut self, name: &str, content: &str) -> DocId {
        let id = self.next_id;
        self.next_id += 1;
        self.documents.push(StoredDocument {
            document: Document::new(id, name, content),
            added_at: unix_now(),
        });
        id
    }

    fn remove(&mut self, id: DocId) -> Result<Document> {
        let pos = self
            .documents
            .iter()
            .position(|r| r.document.id == id)
            .ok_or(DocsimError::DocumentNotFound(id))?;
        Ok(self.documents.remove(pos).document)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Store kept in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn list(&self) -> Result<Vec<StoredDocument>> {
        Ok(self.records.documents.clone())
    }

    fn insert(&mut self, name: &str, content: &str) -> Result<DocId> {
        Ok(self.records.insert(name, content))
    }

    fn remove(&mut self, id: DocId) -> Result<Document> {
        self.records.remove(id)
    }
}

/// Store persisted as a single JSON file.
///
/// The file is read once when opened. Every mutation rewrites it through a
/// temporary sibling file that is renamed over the original, so readers never
/// observe a partially written store.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: Records,
}

impl JsonStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| DocsimError::json(&path, e))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Records::default(),
            Err(e) => return Err(DocsimError::io(&path, e)),
        };
        Ok(Self { path, records })
    }

    /// Gets the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DocsimError::io(parent, e))?;
        }
        let bytes =
            serde_json::to_vec_pretty(&self.records).map_err(|e| DocsimError::json(&self.path, e))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, bytes).map_err(|e| DocsimError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| DocsimError::io(&self.path, e))
    }
}

impl DocumentStore for JsonStore {
    fn list(&self) -> Result<Vec<StoredDocument>> {
        Ok(self.records.documents.clone())
    }

    fn insert(&mut self, name: &str, content: &str) -> Result<DocId> {
        let id = self.records.insert(name, content);
        self.save()?;
        tracing::debug!(id, name, path = %self.path.display(), "inserted document");
        Ok(id)
    }

    fn remove(&mut self, id: DocId) -> Result<Document> {
        let document = self.records.remove(id)?;
        self.save()?;
        tracing::debug!(id, path = %self.path.display(), "removed document");
        Ok(document)
    }
}
