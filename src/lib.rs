//! Assistant CIR: a three-stage wizard that collects project metadata,
//! accepts document uploads, and produces a plain-text CIR report.

pub mod config;
pub mod error;
pub mod generation;
pub mod questionnaire;
pub mod server;
pub mod upload;
pub mod wizard;
