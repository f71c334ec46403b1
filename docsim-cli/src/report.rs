use std::fmt::Write;

use serde::Serialize;

use docsim::{BatchResult, PairOutcome, StoredDocument, TargetReport};

/// Formats a ratio as a percentage with two decimals.
pub fn percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.)
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PairRow {
    pub file1_id: u64,
    pub file2_id: u64,
    pub file1_name: String,
    pub file2_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PairOutcome> for PairRow {
    fn from(outcome: &PairOutcome) -> Self {
        match outcome {
            PairOutcome::Similar(r) => Self {
                file1_id: r.doc_a_id,
                file2_id: r.doc_b_id,
                file1_name: r.doc_a_name.clone(),
                file2_name: r.doc_b_name.clone(),
                similarity: Some(r.ratio),
                similarity_percentage: Some(percentage(r.ratio)),
                details: Some(r.summary()),
                error: None,
            },
            PairOutcome::Failed(f) => Self {
                file1_id: f.doc_a_id,
                file2_id: f.doc_b_id,
                file1_name: f.doc_a_name.clone(),
                file2_name: f.doc_b_name.clone(),
                similarity: None,
                similarity_percentage: None,
                details: None,
                error: Some(f.kind.to_string()),
            },
        }
    }
}

pub fn rows(results: &BatchResult) -> Vec<PairRow> {
    results.entries().iter().map(PairRow::from).collect()
}

#[derive(Debug, Serialize)]
pub struct TargetRows {
    pub target_id: u64,
    pub target_name: String,
    pub results: Vec<PairRow>,
    pub average_similarity: Option<f64>,
    pub average_percentage: Option<String>,
}

impl From<&TargetReport> for TargetRows {
    fn from(report: &TargetReport) -> Self {
        Self {
            target_id: report.target.id,
            target_name: report.target.name.clone(),
            results: rows(&report.results),
            average_similarity: report.average,
            average_percentage: report.average.map(percentage),
        }
    }
}

/// Renders one line per pair, most similar first.
pub fn pair_table(rows: &[PairRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = write!(
            out,
            "{}:{}\t{}:{}\t",
            row.file1_id, row.file1_name, row.file2_id, row.file2_name
        );
        match (&row.similarity_percentage, &row.error) {
            (Some(p), _) => {
                let details = row.details.as_deref().unwrap_or_default();
                let _ = writeln!(out, "{p}\t{details}");
            }
            (None, Some(e)) => {
                let _ = writeln!(out, "error: {e}");
            }
            (None, None) => {
                let _ = writeln!(out);
            }
        }
    }
    out
}

pub fn document_table(records: &[StoredDocument]) -> String {
    let mut out = String::new();
    for r in records {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            r.document.id, r.document.name, r.added_at
        );
    }
    out
}
