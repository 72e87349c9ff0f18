//! Questionnaire navigation state machine.

use tracing::debug;

use crate::error::QuestionnaireError;

use super::form::{FieldKey, ProjectForm};
use super::sections::SectionId;

/// Result of a successful `next()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the given section.
    Advanced(SectionId),
    /// The final section was valid; the questionnaire is complete and
    /// yields the full form.
    Completed(ProjectForm),
}

/// Draft form plus the active section.
///
/// `next()` refuses to advance while any required field in the active
/// section is empty after trimming. `previous()` steps back without
/// clearing anything.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireState {
    form: ProjectForm,
    section: SectionId,
}

impl QuestionnaireState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active section.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Read-only view of the draft form.
    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    /// Update one field of the draft form.
    pub fn set_field(&mut self, key: FieldKey, value: String) {
        self.form.set(key, value);
    }

    /// Required fields of the active section that are still empty.
    pub fn missing_fields(&self) -> Vec<FieldKey> {
        self.section
            .fields()
            .iter()
            .copied()
            .filter(|key| !self.form.is_filled(*key))
            .collect()
    }

    /// Whether the active section may be left via `next()`.
    pub fn section_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Advance to the next section, or complete the questionnaire when
    /// the final section is valid.
    pub fn next(&mut self) -> Result<NextOutcome, QuestionnaireError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(QuestionnaireError::SectionIncomplete {
                section: self.section.to_string(),
                missing: missing
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        match self.section.next() {
            Some(next) => {
                debug!(from = %self.section, to = %next, "Questionnaire advanced");
                self.section = next;
                Ok(NextOutcome::Advanced(next))
            }
            None => {
                debug!("Questionnaire completed");
                Ok(NextOutcome::Completed(self.form.clone()))
            }
        }
    }

    /// Step back one section. A no-op on the first section. Entered
    /// data is always preserved.
    pub fn previous(&mut self) -> SectionId {
        if let Some(prev) = self.section.previous() {
            debug!(from = %self.section, to = %prev, "Questionnaire stepped back");
            self.section = prev;
        }
        self.section
    }
}
