//! The fixed generation step plan.

use serde::{Deserialize, Serialize};

/// The four pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Analysis,
    Contextualization,
    Generation,
    Formatting,
}

impl StepId {
    /// All steps, in execution order.
    pub const ALL: [StepId; 4] = [
        Self::Analysis,
        Self::Contextualization,
        Self::Generation,
        Self::Formatting,
    ];

    /// User-facing step label, verbatim from the original UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Analyse des documents",
            Self::Contextualization => "Contextualisation",
            Self::Generation => "Génération du rapport",
            Self::Formatting => "Mise en forme",
        }
    }

    /// User-facing step description, verbatim from the original UI.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Analysis => "Extraction et analyse du contenu des fichiers téléversés...",
            Self::Contextualization => "Intégration des informations du questionnaire...",
            Self::Generation => "Création du document CIR structuré...",
            Self::Formatting => "Application du template et finalisation...",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Analysis => "analysis",
            Self::Contextualization => "contextualization",
            Self::Generation => "generation",
            Self::Formatting => "formatting",
        };
        write!(f, "{s}")
    }
}

/// One step of the simulated pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStep {
    pub id: StepId,
    pub label: String,
    pub description: String,
    pub completed: bool,
    /// Progress in [0, 100]. Clamped to exactly 100 on completion.
    pub progress: f64,
}

impl GenerationStep {
    /// A fresh, pending step.
    pub fn new(id: StepId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            description: id.description().to_string(),
            completed: false,
            progress: 0.0,
        }
    }

    /// The initial four-step plan.
    pub fn plan() -> Vec<GenerationStep> {
        StepId::ALL.iter().map(|id| Self::new(*id)).collect()
    }

    /// Reset to pending with zero progress.
    pub fn reset(&mut self) {
        self.completed = false;
        self.progress = 0.0;
    }
}
