//! Uploaded document model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three accepted document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Pptx,
}

impl DocumentKind {
    /// Map a declared MIME type to a kind, if it is on the allow-list.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(Self::Pptx)
            }
            _ => None,
        }
    }

    /// The MIME type for this kind.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// The filename extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Pptx => ".pptx",
        }
    }
}

/// An accepted upload.
///
/// The raw bytes are kept opaquely for the (simulated) analysis stage
/// and are never serialized out to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: Uuid,
    /// Original filename as supplied by the client.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub content_type: String,
    pub kind: DocumentKind,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: String, content_type: String, kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            size: bytes.len() as u64,
            content_type,
            kind,
            bytes,
        }
    }

    /// Human-readable size (B / KB / MB), as shown in the upload list.
    pub fn size_display(&self) -> String {
        let bytes = self.size;
        if bytes < 1024 {
            format!("{bytes} B")
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Size in megabytes with two decimals, as rendered in the report.
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size as f64 / 1024.0 / 1024.0)
    }
}
