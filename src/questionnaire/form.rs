//! Project form data model.

use serde::{Deserialize, Serialize};

/// Addresses one of the ten required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    CompanyName,
    ProjectTitle,
    ProjectDescription,
    Objectives,
    StartDate,
    EndDate,
    Budget,
    TeamSize,
    TechnicalChallenges,
    ExpectedResults,
}

/// How a front-end should render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Textarea,
    Date,
    Number,
}

impl FieldKey {
    /// All fields, in form order.
    pub const ALL: [FieldKey; 10] = [
        Self::CompanyName,
        Self::ProjectTitle,
        Self::ProjectDescription,
        Self::Objectives,
        Self::StartDate,
        Self::EndDate,
        Self::Budget,
        Self::TeamSize,
        Self::TechnicalChallenges,
        Self::ExpectedResults,
    ];

    /// User-facing label, as displayed by the original questionnaire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Nom de R&D Lines",
            Self::ProjectTitle => "Titre du projet",
            Self::ProjectDescription => "Description du projet",
            Self::Objectives => "Objectifs principaux",
            Self::StartDate => "Date de début",
            Self::EndDate => "Date de fin",
            Self::Budget => "Budget total (€)",
            Self::TeamSize => "Taille de l'équipe",
            Self::TechnicalChallenges => "Défis techniques",
            Self::ExpectedResults => "Résultats attendus",
        }
    }

    /// Widget kind for the field.
    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::CompanyName | Self::ProjectTitle => InputKind::Text,
            Self::ProjectDescription
            | Self::Objectives
            | Self::TechnicalChallenges
            | Self::ExpectedResults => InputKind::Textarea,
            Self::StartDate | Self::EndDate => InputKind::Date,
            Self::Budget | Self::TeamSize => InputKind::Number,
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CompanyName => "company_name",
            Self::ProjectTitle => "project_title",
            Self::ProjectDescription => "project_description",
            Self::Objectives => "objectives",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Budget => "budget",
            Self::TeamSize => "team_size",
            Self::TechnicalChallenges => "technical_challenges",
            Self::ExpectedResults => "expected_results",
        };
        write!(f, "{s}")
    }
}

/// The ten required project fields collected by the questionnaire.
///
/// Every field is a free-form string; dates and numbers are stored as
/// entered, with no format validation beyond non-emptiness. Once the
/// questionnaire completes, the form is treated as read-only by the
/// later stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectForm {
    pub company_name: String,
    pub project_title: String,
    pub project_description: String,
    pub objectives: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub team_size: String,
    pub technical_challenges: String,
    pub expected_results: String,
}

impl ProjectForm {
    /// Read a field by key.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::CompanyName => &self.company_name,
            FieldKey::ProjectTitle => &self.project_title,
            FieldKey::ProjectDescription => &self.project_description,
            FieldKey::Objectives => &self.objectives,
            FieldKey::StartDate => &self.start_date,
            FieldKey::EndDate => &self.end_date,
            FieldKey::Budget => &self.budget,
            FieldKey::TeamSize => &self.team_size,
            FieldKey::TechnicalChallenges => &self.technical_challenges,
            FieldKey::ExpectedResults => &self.expected_results,
        }
    }

    /// Write a field by key.
    pub fn set(&mut self, key: FieldKey, value: String) {
        let slot = match key {
            FieldKey::CompanyName => &mut self.company_name,
            FieldKey::ProjectTitle => &mut self.project_title,
            FieldKey::ProjectDescription => &mut self.project_description,
            FieldKey::Objectives => &mut self.objectives,
            FieldKey::StartDate => &mut self.start_date,
            FieldKey::EndDate => &mut self.end_date,
            FieldKey::Budget => &mut self.budget,
            FieldKey::TeamSize => &mut self.team_size,
            FieldKey::TechnicalChallenges => &mut self.technical_challenges,
            FieldKey::ExpectedResults => &mut self.expected_results,
        };
        *slot = value;
    }

    /// Whether a field is filled (non-empty after trimming).
    pub fn is_filled(&self, key: FieldKey) -> bool {
        !self.get(key).trim().is_empty()
    }

    /// Whether all ten fields are filled.
    pub fn is_complete(&self) -> bool {
        FieldKey::ALL.iter().all(|key| self.is_filled(*key))
    }
}
