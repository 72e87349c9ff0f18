//! Questionnaire sections: fixed order, fixed field grouping.

use serde::{Deserialize, Serialize};

use super::form::FieldKey;

/// The four questionnaire sections.
///
/// Progresses linearly: GeneralInfo -> ProjectDescription ->
/// ScheduleResources -> TechnicalAspects. Backward navigation is
/// allowed within the questionnaire and never clears entered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    GeneralInfo,
    ProjectDescription,
    ScheduleResources,
    TechnicalAspects,
}

impl SectionId {
    /// All sections, in presentation order.
    pub const ALL: [SectionId; 4] = [
        Self::GeneralInfo,
        Self::ProjectDescription,
        Self::ScheduleResources,
        Self::TechnicalAspects,
    ];

    /// Zero-based position of this section.
    pub fn index(&self) -> usize {
        match self {
            Self::GeneralInfo => 0,
            Self::ProjectDescription => 1,
            Self::ScheduleResources => 2,
            Self::TechnicalAspects => 3,
        }
    }

    /// User-facing section title, as displayed by the original UI.
    pub fn title(&self) -> &'static str {
        match self {
            Self::GeneralInfo => "Informations générales",
            Self::ProjectDescription => "Description du projet",
            Self::ScheduleResources => "Planning et ressources",
            Self::TechnicalAspects => "Aspects techniques",
        }
    }

    /// Required fields in this section, in presentation order.
    pub fn fields(&self) -> &'static [FieldKey] {
        match self {
            Self::GeneralInfo => &[FieldKey::CompanyName, FieldKey::ProjectTitle],
            Self::ProjectDescription => &[FieldKey::ProjectDescription, FieldKey::Objectives],
            Self::ScheduleResources => &[
                FieldKey::StartDate,
                FieldKey::EndDate,
                FieldKey::Budget,
                FieldKey::TeamSize,
            ],
            Self::TechnicalAspects => &[FieldKey::TechnicalChallenges, FieldKey::ExpectedResults],
        }
    }

    /// The next section in the linear progression, if any.
    pub fn next(&self) -> Option<SectionId> {
        match self {
            Self::GeneralInfo => Some(Self::ProjectDescription),
            Self::ProjectDescription => Some(Self::ScheduleResources),
            Self::ScheduleResources => Some(Self::TechnicalAspects),
            Self::TechnicalAspects => None,
        }
    }

    /// The previous section, if any.
    pub fn previous(&self) -> Option<SectionId> {
        match self {
            Self::GeneralInfo => None,
            Self::ProjectDescription => Some(Self::GeneralInfo),
            Self::ScheduleResources => Some(Self::ProjectDescription),
            Self::TechnicalAspects => Some(Self::ScheduleResources),
        }
    }

    /// Whether this is the last section.
    pub fn is_last(&self) -> bool {
        matches!(self, Self::TechnicalAspects)
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::GeneralInfo
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::GeneralInfo => "general_info",
            Self::ProjectDescription => "project_description",
            Self::ScheduleResources => "schedule_resources",
            Self::TechnicalAspects => "technical_aspects",
        };
        write!(f, "{s}")
    }
}
