//! Upload validation: MIME allow-list and size ceiling.

use serde::{Deserialize, Serialize};

use super::document::DocumentKind;

/// Default size ceiling in bytes, inclusive: a file of exactly this
/// size is accepted. `WizardConfig.max_file_bytes` carries the active
/// value.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024; // 10MB

/// Why a candidate file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnsupportedType,
    FileTooLarge,
}

impl RejectReason {
    /// User-facing message, verbatim from the original UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "Type de fichier non supporté. Utilisez PDF, DOCX ou PPTX.",
            Self::FileTooLarge => "Fichier trop volumineux. Taille maximale: 10MB.",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Validate a candidate by declared MIME type and size against the
/// given ceiling (inclusive).
///
/// Type is checked first, matching the original validation order.
pub fn validate(
    content_type: &str,
    size: u64,
    max_bytes: u64,
) -> Result<DocumentKind, RejectReason> {
    let kind = DocumentKind::from_mime(content_type).ok_or(RejectReason::UnsupportedType)?;
    if size > max_bytes {
        return Err(RejectReason::FileTooLarge);
    }
    Ok(kind)
}
