//! Ranked comparison of many documents.
use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;

use crate::compare::Comparator;
use crate::config::EngineConfig;
use crate::document::{DocId, Document};
use crate::errors::{DocsimError, Result};
use crate::result::{BatchResult, PairOutcome, SimilarityResult};

/// Compares every unordered pair of a document collection and ranks the outcomes.
///
/// A pair that cannot be compared is recorded as [`PairOutcome::Failed`] and
/// does not stop the remaining pairs. Request-level problems (unknown ids,
/// too few documents) are reported before any pair is compared.
#[derive(Clone, Debug, Default)]
pub struct BatchComparator {
    comparator: Comparator,
    parallel: bool,
    shows_progress: bool,
}

/// One document compared against all others.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetReport {
    /// The document compared against the rest.
    pub target: Document,
    /// Ranked outcomes; the target is always on the left side.
    pub results: BatchResult,
    /// Mean ratio over the pairs that could be compared.
    pub average: Option<f64>,
}

impl BatchComparator {
    /// Creates an instance.
    pub const fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            parallel: false,
            shows_progress: false,
        }
    }

    /// Creates an instance from options.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Comparator::from_config(config)).parallel(config.parallel)
    }

    /// Evaluates pairs on the rayon thread pool?
    ///
    /// The ranking is identical to the sequential one.
    pub const fn parallel(mut self, yes: bool) -> Self {
        self.parallel = yes;
        self
    }

    /// Shows the progress via the standard error output?
    pub const fn shows_progress(mut self, yes: bool) -> Self {
        self.shows_progress = yes;
        self
    }

    /// Gets the pairwise comparator.
    pub const fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Compares all unordered pairs of `documents`.
    ///
    /// # Errors
    ///
    /// [`DocsimError::InsufficientDocuments`] if fewer than two documents are given.
    pub fn compare_all(&self, documents: &[Document]) -> Result<BatchResult> {
        if documents.len() < 2 {
            return Err(DocsimError::InsufficientDocuments {
                available: documents.len(),
            });
        }
        let documents: Vec<&Document> = documents.iter().collect();
        Ok(self.rank_pairs(&documents))
    }

    /// Compares all unordered pairs of the documents identified by `ids`.
    ///
    /// Pairs are enumerated in the order of `ids`; repeated ids count once.
    ///
    /// # Errors
    ///
    /// - [`DocsimError::InsufficientSelection`] if fewer than two distinct ids are given.
    /// - [`DocsimError::DocumentNotFound`] if an id is not in `documents`.
    pub fn compare_selected(&self, documents: &[Document], ids: &[DocId]) -> Result<BatchResult> {
        if ids.len() < 2 {
            return Err(DocsimError::InsufficientSelection {
                selected: ids.len(),
            });
        }
        let index = index_by_id(documents);
        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(ids.len());
        for &id in ids {
            let doc = *index.get(&id).ok_or(DocsimError::DocumentNotFound(id))?;
            if seen.insert(id) {
                selected.push(doc);
            }
        }
        if selected.len() < 2 {
            return Err(DocsimError::InsufficientSelection {
                selected: selected.len(),
            });
        }
        Ok(self.rank_pairs(&selected))
    }

    /// Compares the two documents identified by `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`DocsimError::DocumentNotFound`] if an id is not in `documents`.
    /// - [`DocsimError::Comparison`] if the pair cannot be compared.
    pub fn compare_pair(
        &self,
        documents: &[Document],
        a: DocId,
        b: DocId,
    ) -> Result<SimilarityResult> {
        let index = index_by_id(documents);
        let doc_a = *index.get(&a).ok_or(DocsimError::DocumentNotFound(a))?;
        let doc_b = *index.get(&b).ok_or(DocsimError::DocumentNotFound(b))?;
        Ok(self.comparator.compare(doc_a, doc_b)?)
    }

    /// Compares the document identified by `target` against every other document.
    ///
    /// # Errors
    ///
    /// - [`DocsimError::DocumentNotFound`] if `target` is not in `documents`.
    /// - [`DocsimError::InsufficientDocuments`] if there is no other document.
    pub fn compare_against(&self, documents: &[Document], target: DocId) -> Result<TargetReport> {
        let target = documents
            .iter()
            .find(|d| d.id == target)
            .ok_or(DocsimError::DocumentNotFound(target))?;
        let others: Vec<&Document> = documents.iter().filter(|d| d.id != target.id).collect();
        if others.is_empty() {
            return Err(DocsimError::InsufficientDocuments { available: 1 });
        }

        let pairs: Vec<_> = others.into_iter().map(|other| (target, other)).collect();
        let results = self.rank(self.evaluate(&pairs));
        let (sum, count) = results
            .successes()
            .fold((0., 0usize), |(sum, count), r| (sum + r.ratio, count + 1));
        let average = (count != 0).then(|| sum / count as f64);
        Ok(TargetReport {
            target: target.clone(),
            results,
            average,
        })
    }

    fn rank_pairs(&self, documents: &[&Document]) -> BatchResult {
        let pairs: Vec<_> = unordered_pairs(documents.len())
            .map(|(i, j)| (documents[i], documents[j]))
            .collect();
        self.rank(self.evaluate(&pairs))
    }

    fn evaluate(&self, pairs: &[(&Document, &Document)]) -> Vec<PairOutcome> {
        if self.shows_progress {
            eprintln!("Comparing {} pairs...", pairs.len());
        }
        // Both paths keep the enumeration order, so ties rank identically.
        let outcomes: Vec<PairOutcome> = if self.parallel {
            pairs
                .par_iter()
                .map(|&(a, b)| PairOutcome::from(self.comparator.compare(a, b)))
                .collect()
        } else {
            pairs
                .iter()
                .enumerate()
                .map(|(k, &(a, b))| {
                    if self.shows_progress && (k + 1) % 1000 == 0 {
                        eprintln!("Processed {} pairs...", k + 1);
                    }
                    PairOutcome::from(self.comparator.compare(a, b))
                })
                .collect()
        };
        for failure in outcomes.iter().filter_map(PairOutcome::as_failed) {
            tracing::warn!(
                doc_a = failure.doc_a_id,
                doc_b = failure.doc_b_id,
                "{failure}"
            );
        }
        outcomes
    }

    fn rank(&self, outcomes: Vec<PairOutcome>) -> BatchResult {
        let results = BatchResult::ranked(outcomes);
        tracing::debug!(
            pairs = results.len(),
            failures = results.failures().count(),
            parallel = self.parallel,
            "ranked batch"
        );
        if self.shows_progress {
            eprintln!("Done");
        }
        results
    }
}

/// Enumerates `(i, j)` with `i < j < n` in lexicographic order.
pub fn unordered_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

fn index_by_id(documents: &[Document]) -> HashMap<DocId, &Document> {
    let mut index = HashMap::with_capacity(documents.len());
    for doc in documents {
        index.entry(doc.id).or_insert(doc);
    }
    index
}
