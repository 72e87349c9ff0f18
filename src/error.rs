//! Error types for the CIR assistant.

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Questionnaire error: {0}")]
    Questionnaire(#[from] QuestionnaireError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Stage orchestration errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Operation requires stage {expected}, but the wizard is in stage {actual}")]
    StageMismatch { expected: String, actual: String },

    #[error("The questionnaire must be completed before generating a report")]
    FormIncomplete,

    #[error("At least one document must be uploaded before generating a report")]
    NoDocuments,
}

/// Questionnaire navigation errors.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("Section {section} has empty required fields: {missing}")]
    SectionIncomplete { section: String, missing: String },
}

/// Upload transport errors. Per-file validation failures are not errors:
/// they are collected into a `BatchReport` so the rest of the batch can
/// still be accepted.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Malformed upload payload: {0}")]
    MalformedPayload(String),
}

/// Generation pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("A generation run is already in progress")]
    AlreadyRunning,

    #[error("The report is not ready yet")]
    NotReady,
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
