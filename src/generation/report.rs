//! Plain-text report rendering and download artifact.
//!
//! The template is reproduced verbatim from the original generator so
//! downstream consumers of the .txt file see an identical layout.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::questionnaire::ProjectForm;
use crate::upload::UploadedDocument;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// MIME type of the downloaded report.
pub const REPORT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// A rendered report ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
}

impl ReportArtifact {
    pub fn new(form: &ProjectForm, documents: &[UploadedDocument], date: NaiveDate) -> Self {
        Self {
            filename: report_filename(&form.company_name),
            content_type: REPORT_CONTENT_TYPE,
            content: render_report(form, documents, date),
        }
    }
}

/// Deterministic download filename: whitespace runs in the company name
/// become underscores.
pub fn report_filename(company_name: &str) -> String {
    let sanitized = WHITESPACE_RUNS.replace_all(company_name, "_");
    format!("Rapport_CIR_{sanitized}.txt")
}

/// Render the report text by interpolating the form and file list into
/// the fixed template.
pub fn render_report(form: &ProjectForm, documents: &[UploadedDocument], date: NaiveDate) -> String {
    let file_lines = documents
        .iter()
        .map(|doc| format!("- {} ({} MB)", doc.name, doc.size_mb()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "RAPPORT CIR - {company}\n\
         =====================================\n\
         \n\
         PROJET: {title}\n\
         \n\
         1. CONTEXT/OBJECTIVES\n\
         {objectives}\n\
         \n\
         2. DESCRIPTION DU PROJET\n\
         {description}\n\
         \n\
         3. PÉRIODE ET BUDGET\n\
         - Début: {start}\n\
         - Fin: {end}\n\
         - Budget: {budget}€\n\
         - Équipe: {team} personnes\n\
         \n\
         4. DÉFIS TECHNIQUES\n\
         {challenges}\n\
         \n\
         5. RÉSULTATS ATTENDUS\n\
         {results}\n\
         \n\
         6. DOCUMENTS ANALYSÉS\n\
         {files}\n\
         \n\
         ---\n\
         Rapport généré automatiquement par l'Assistant CIR\n\
         Date de génération: {date}",
        company = form.company_name,
        title = form.project_title,
        objectives = form.objectives,
        description = form.project_description,
        start = form.start_date,
        end = form.end_date,
        budget = form.budget,
        team = form.team_size,
        challenges = form.technical_challenges,
        results = form.expected_results,
        files = file_lines,
        date = date.format("%d/%m/%Y"),
    )
}
