//! Questionnaire stage: a fixed sequence of field sections that builds
//! the `ProjectForm`.
//!
//! The questionnaire drives the user through four sections in order,
//! refusing to advance while the active section has empty required
//! fields. Completing the last section yields the full, validated form.

pub mod form;
pub mod sections;
pub mod state;

pub use form::{FieldKey, InputKind, ProjectForm};
pub use sections::SectionId;
pub use state::{NextOutcome, QuestionnaireState};
