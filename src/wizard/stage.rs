//! Wizard stage state machine.

use serde::{Deserialize, Serialize};

/// The three top-level wizard stages.
///
/// Progresses linearly and forward-only: Questionnaire -> Upload ->
/// Generate. Once generation starts there is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    Questionnaire,
    Upload,
    Generate,
}

impl WizardStage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardStage) -> bool {
        use WizardStage::*;
        matches!((self, target), (Questionnaire, Upload) | (Upload, Generate))
    }

    /// The next stage in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStage> {
        match self {
            Self::Questionnaire => Some(Self::Upload),
            Self::Upload => Some(Self::Generate),
            Self::Generate => None,
        }
    }

    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Generate)
    }
}

impl Default for WizardStage {
    fn default() -> Self {
        Self::Questionnaire
    }
}

impl std::fmt::Display for WizardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Questionnaire => "questionnaire",
            Self::Upload => "upload",
            Self::Generate => "generate",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use WizardStage::*;
        assert!(Questionnaire.can_transition_to(Upload));
        assert!(Upload.can_transition_to(Generate));
    }

    #[test]
    fn invalid_transitions() {
        use WizardStage::*;
        // Skip a stage
        assert!(!Questionnaire.can_transition_to(Generate));
        // Go backward
        assert!(!Upload.can_transition_to(Questionnaire));
        assert!(!Generate.can_transition_to(Upload));
        assert!(!Generate.can_transition_to(Questionnaire));
        // Self-transition
        assert!(!Upload.can_transition_to(Upload));
    }

    #[test]
    fn next_walks_all_stages() {
        let mut current = WizardStage::Questionnaire;
        for expected in [WizardStage::Upload, WizardStage::Generate] {
            let next = current.next().unwrap();
            assert_eq!(next, expected);
            current = next;
        }
        assert!(current.next().is_none());
        assert!(current.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        for stage in [
            WizardStage::Questionnaire,
            WizardStage::Upload,
            WizardStage::Generate,
        ] {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{stage}\""));
        }
    }
}
