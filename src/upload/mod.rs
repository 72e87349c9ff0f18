//! Upload stage: document validation and the accepted-document list.
//!
//! Candidates are validated by declared MIME type and size only; file
//! content is retained opaquely and never parsed. Validation failures
//! are aggregated into a per-batch report so valid files in the same
//! batch are still accepted.

pub mod document;
pub mod store;
pub mod validate;

pub use document::{DocumentKind, UploadedDocument};
pub use store::{BatchReport, Candidate, DocumentStore, RejectedUpload};
pub use validate::{MAX_FILE_BYTES, RejectReason, validate};
