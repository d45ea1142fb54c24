//! Non-interactive subcommands: one request each, results on stdout.

use std::path::{Path, PathBuf};

use crate::api::{ApiError, FormattedTextResponse, RecruitApi};
use crate::error::RecruitError;
use crate::wizard::steps::{GenerateForm, MAX_RESUMES, MatchSummary, build_candidates};
use crate::wizard::{Candidate, Document};

/// Formats a job description document.
pub async fn process<A: RecruitApi>(
    api: &A,
    path: &Path,
) -> Result<FormattedTextResponse, RecruitError> {
    let document = accepted_document(path)?;
    tracing::info!(file = %document.name, bytes = document.size(), "processing job description");
    Ok(api.process_job_description(&document).await?)
}

pub async fn generate<A: RecruitApi>(
    api: &A,
    form: &GenerateForm,
) -> Result<FormattedTextResponse, RecruitError> {
    if !form.is_ready() {
        return Err(RecruitError::MissingGenerateFields);
    }
    Ok(api.generate_job_description(&form.to_request()).await?)
}

/// `job` is a PDF/Word document (formatted by the server), a text file, or
/// the description itself.
pub async fn load_job_description<A: RecruitApi>(
    api: &A,
    job: &str,
) -> Result<String, RecruitError> {
    let path = Path::new(job);
    let text = if !path.is_file() {
        job.to_string()
    } else {
        let document = Document::from_path(path)?;
        if document.is_accepted() {
            tracing::info!(file = %document.name, "formatting job description document");
            api.process_job_description(&document).await?.formatted_text
        } else {
            String::from_utf8(document.bytes).map_err(|_| RecruitError::UnsupportedDocument {
                name: document.name,
                mime_type: document.mime_type,
            })?
        }
    };
    if text.trim().is_empty() {
        return Err(RecruitError::EmptyJobDescription);
    }
    Ok(text)
}

/// Reads resumes in order. Anything past the limit is dropped with a warning.
pub fn load_resumes(paths: &[PathBuf]) -> Result<Vec<Document>, RecruitError> {
    if paths.is_empty() {
        return Err(RecruitError::NoResumes);
    }
    if paths.len() > MAX_RESUMES {
        tracing::warn!(
            given = paths.len(),
            limit = MAX_RESUMES,
            "too many resumes, extra files ignored"
        );
    }
    paths
        .iter()
        .take(MAX_RESUMES)
        .map(|p| accepted_document(p))
        .collect()
}

#[derive(Debug, Clone)]
pub struct MatchResults {
    pub candidates: Vec<Candidate>,
    pub summary: MatchSummary,
}

pub async fn match_resumes<A: RecruitApi>(
    api: &A,
    job_description: &str,
    resumes: &[Document],
) -> Result<MatchResults, RecruitError> {
    if job_description.trim().is_empty() {
        return Err(RecruitError::EmptyJobDescription);
    }
    if resumes.is_empty() {
        return Err(RecruitError::NoResumes);
    }

    let response = api.match_and_score(job_description, resumes).await?;
    let candidates = build_candidates(&response);
    if candidates.is_empty() {
        return Err(ApiError::Decode("no candidate rankings in response".into()).into());
    }
    let summary = MatchSummary::from_analytics(&response.analytics, &candidates);
    Ok(MatchResults {
        candidates,
        summary,
    })
}

fn accepted_document(path: &Path) -> Result<Document, RecruitError> {
    let document = Document::from_path(path)?;
    if !document.is_accepted() {
        return Err(RecruitError::UnsupportedDocument {
            name: document.name,
            mime_type: document.mime_type,
        });
    }
    Ok(document)
}
