//! Accepted-document list with batch validation.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::document::UploadedDocument;
use super::validate::{RejectReason, validate};

/// A file offered for upload, before validation.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// One rejected file within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedUpload {
    pub name: String,
    pub reason: RejectReason,
}

/// Outcome of one `add_batch` call.
///
/// Valid files in a batch are accepted even when others are rejected.
/// Duplicate filenames are skipped silently and appear in neither list,
/// preserving the original behavior.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub added: Vec<UploadedDocument>,
    pub rejected: Vec<RejectedUpload>,
}

impl BatchReport {
    /// Aggregated error text in the original `name: reason` format, or
    /// `None` when nothing was rejected.
    pub fn error_summary(&self) -> Option<String> {
        if self.rejected.is_empty() {
            return None;
        }
        Some(
            self.rejected
                .iter()
                .map(|r| format!("{}: {}", r.name, r.reason))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// In-memory list of accepted documents, insertion-ordered.
#[derive(Debug)]
pub struct DocumentStore {
    documents: Vec<UploadedDocument>,
    max_bytes: u64,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::with_max_bytes(super::validate::MAX_FILE_BYTES)
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with a custom size ceiling (inclusive).
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self {
            documents: Vec::new(),
            max_bytes,
        }
    }

    /// Validate and add a batch of candidates.
    ///
    /// Each candidate is validated by declared type and size; failures
    /// are reported per file. Candidates whose filename already exists
    /// (in the store or earlier in the same batch) are skipped without
    /// being reported.
    pub fn add_batch(&mut self, candidates: Vec<Candidate>) -> BatchReport {
        let mut report = BatchReport::default();

        for candidate in candidates {
            match validate(
                &candidate.content_type,
                candidate.bytes.len() as u64,
                self.max_bytes,
            ) {
                Err(reason) => {
                    warn!(name = %candidate.name, reason = %reason, "Upload rejected");
                    report.rejected.push(RejectedUpload {
                        name: candidate.name,
                        reason,
                    });
                }
                Ok(kind) => {
                    if self.contains_name(&candidate.name)
                        || report.added.iter().any(|d| d.name == candidate.name)
                    {
                        debug!(name = %candidate.name, "Duplicate filename skipped");
                        continue;
                    }
                    let doc = UploadedDocument::new(
                        candidate.name,
                        candidate.content_type,
                        kind,
                        candidate.bytes,
                    );
                    info!(id = %doc.id, name = %doc.name, size = doc.size, "Document added");
                    report.added.push(doc);
                }
            }
        }

        self.documents.extend(report.added.iter().cloned());
        report
    }

    /// Remove a document by id. Returns false (a no-op) for unknown ids.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        let removed = self.documents.len() < before;
        if removed {
            info!(id = %id, "Document removed");
        }
        removed
    }

    /// The complete current list, in insertion order.
    pub fn list(&self) -> &[UploadedDocument] {
        &self.documents
    }

    /// Cloned snapshot of the current list.
    pub fn snapshot(&self) -> Vec<UploadedDocument> {
        self.documents.clone()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.documents.iter().any(|d| d.name == name)
    }
}
