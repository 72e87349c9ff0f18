//! Top-level orchestrator.
//!
//! The `Wizard` owns all application state: the questionnaire draft,
//! the completed form, the document list, the generation run and the
//! active stage. Children never share state; every mutation goes
//! through an explicit method here, and callers receive snapshots.

pub mod driver;
pub mod stage;

pub use driver::{spawn_generating_hold, spawn_generation_driver};
pub use stage::WizardStage;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::WizardConfig;
use crate::error::{Error, GenerationError, Result, WizardError};
use crate::generation::{GenerationRun, ReportArtifact, RunPhase, TickOutcome};
use crate::questionnaire::{FieldKey, NextOutcome, ProjectForm, QuestionnaireState, SectionId};
use crate::upload::{BatchReport, Candidate, DocumentStore};

/// Read-only status snapshot for the API.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub stage: WizardStage,
    pub section: SectionId,
    pub form_completed: bool,
    pub document_count: usize,
    pub generating: bool,
    pub run_phase: RunPhase,
    pub overall_progress: f64,
}

/// The wizard orchestrator.
#[derive(Debug)]
pub struct Wizard {
    config: WizardConfig,
    stage: WizardStage,
    questionnaire: QuestionnaireState,
    /// Set exactly once, on questionnaire completion; read-only after.
    form: Option<ProjectForm>,
    documents: DocumentStore,
    run: GenerationRun,
    /// Orchestrator-level "work in progress" flag, held for a fixed
    /// duration independent of the step ticker. Preserved legacy
    /// behavior from the original app.
    generating: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}

impl Wizard {
    pub fn new(config: WizardConfig) -> Self {
        let documents = DocumentStore::with_max_bytes(config.max_file_bytes);
        Self {
            config,
            stage: WizardStage::default(),
            questionnaire: QuestionnaireState::new(),
            form: None,
            documents,
            run: GenerationRun::new(),
            generating: false,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn questionnaire(&self) -> &QuestionnaireState {
        &self.questionnaire
    }

    pub fn form(&self) -> Option<&ProjectForm> {
        self.form.as_ref()
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn run(&self) -> &GenerationRun {
        &self.run
    }

    pub fn generating(&self) -> bool {
        self.generating
    }

    fn require_stage(&self, expected: WizardStage) -> std::result::Result<(), WizardError> {
        if self.stage != expected {
            return Err(WizardError::StageMismatch {
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            });
        }
        Ok(())
    }

    // ── Questionnaire stage ─────────────────────────────────────────

    /// Update one questionnaire field. Only valid before completion.
    pub fn set_field(&mut self, key: FieldKey, value: String) -> Result<()> {
        self.require_stage(WizardStage::Questionnaire)?;
        self.questionnaire.set_field(key, value);
        Ok(())
    }

    /// Advance the questionnaire. On completion the form is frozen and
    /// the wizard moves to the upload stage.
    pub fn questionnaire_next(&mut self) -> Result<NextOutcome> {
        self.require_stage(WizardStage::Questionnaire)?;
        let outcome = self.questionnaire.next().map_err(Error::Questionnaire)?;
        if let NextOutcome::Completed(form) = &outcome {
            debug_assert!(self.stage.can_transition_to(WizardStage::Upload));
            self.form = Some(form.clone());
            self.stage = WizardStage::Upload;
            info!(company = %form.company_name, "Questionnaire completed, moving to upload");
        }
        Ok(outcome)
    }

    /// Step the questionnaire back one section.
    pub fn questionnaire_previous(&mut self) -> Result<SectionId> {
        self.require_stage(WizardStage::Questionnaire)?;
        Ok(self.questionnaire.previous())
    }

    // ── Upload stage ────────────────────────────────────────────────

    /// Validate and add a batch of candidate files.
    pub fn add_documents(&mut self, candidates: Vec<Candidate>) -> Result<BatchReport> {
        self.require_stage(WizardStage::Upload)?;
        Ok(self.documents.add_batch(candidates))
    }

    /// Remove a document by id. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: Uuid) -> Result<bool> {
        self.require_stage(WizardStage::Upload)?;
        Ok(self.documents.remove(id))
    }

    // ── Generation stage ────────────────────────────────────────────

    /// Enter the generation stage and start a run.
    ///
    /// Requires a fully populated form and at least one document.
    pub fn start_generation(&mut self) -> Result<()> {
        self.require_stage(WizardStage::Upload)?;
        match &self.form {
            Some(form) if form.is_complete() => {}
            _ => return Err(WizardError::FormIncomplete.into()),
        }
        if self.documents.is_empty() {
            return Err(WizardError::NoDocuments.into());
        }

        debug_assert!(self.stage.can_transition_to(WizardStage::Generate));
        self.stage = WizardStage::Generate;
        self.generating = true;
        self.run.start();
        info!(documents = self.documents.len(), "Entering generation stage");
        Ok(())
    }

    /// Restart the run from zero. Only valid once the prior run is done;
    /// there is no cancellation path for a running sequence.
    pub fn regenerate(&mut self) -> Result<()> {
        self.require_stage(WizardStage::Generate)?;
        if !self.run.is_done() {
            return Err(GenerationError::AlreadyRunning.into());
        }
        info!("Regenerating report");
        self.run.start();
        Ok(())
    }

    /// Apply one tick of progress to the active step.
    pub fn advance_generation(&mut self, increment: f64) -> TickOutcome {
        self.run.advance(increment)
    }

    /// Activate the next step after the inter-step pause.
    pub fn activate_next_step(&mut self) {
        self.run.activate_next();
    }

    /// Clear the orchestrator-level generating flag (hold elapsed).
    pub fn clear_generating(&mut self) {
        self.generating = false;
    }

    /// Render the report for download. Only available once the run has
    /// completed.
    pub fn report(&self, date: NaiveDate) -> Result<ReportArtifact> {
        if !self.run.is_done() {
            return Err(GenerationError::NotReady.into());
        }
        let form = self.form.as_ref().ok_or(WizardError::FormIncomplete)?;
        Ok(ReportArtifact::new(form, self.documents.list(), date))
    }

    /// Current status snapshot.
    pub fn status(&self) -> StatusSummary {
        StatusSummary {
            stage: self.stage,
            section: self.questionnaire.section(),
            form_completed: self.form.is_some(),
            document_count: self.documents.len(),
            generating: self.generating,
            run_phase: self.run.phase(),
            overall_progress: self.run.overall_progress(),
        }
    }
}
