//! JSON export of a finished analysis.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::RecruitError;
use crate::wizard::Candidate;
use crate::wizard::steps::MatchSummary;

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub job_description: String,
    pub resumes: Vec<String>,
    pub summary: MatchSummary,
    pub candidates: Vec<Candidate>,
}

impl MatchReport {
    pub fn new(
        job_description: &str,
        resumes: Vec<String>,
        summary: MatchSummary,
        candidates: &[Candidate],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            job_description: job_description.to_string(),
            resumes,
            summary,
            candidates: candidates.to_vec(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), RecruitError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "match report written");
        Ok(())
    }
}
