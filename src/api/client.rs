use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{ErrorBody, FormattedTextResponse, GenerateRequest, MatchAndScoreResponse};
use crate::config::AppConfig;
use crate::wizard::Document;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// The three remote operations the wizard depends on.
///
/// Implemented by [`RecruitClient`] over HTTP and by mocks in tests.
pub trait RecruitApi {
    async fn process_job_description(
        &self,
        document: &Document,
    ) -> Result<FormattedTextResponse, ApiError>;

    async fn generate_job_description(
        &self,
        request: &GenerateRequest,
    ) -> Result<FormattedTextResponse, ApiError>;

    async fn match_and_score(
        &self,
        job_description: &str,
        resumes: &[Document],
    ) -> Result<MatchAndScoreResponse, ApiError>;
}

pub struct RecruitClient {
    client: Client,
    base_url: String,
}

impl RecruitClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(
            config.api_base_url.clone(),
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(|body| body.message);
            let err = ApiError::from_status(status.as_u16(), message);
            tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "API response did not decode");
            ApiError::Decode(e.to_string())
        })
    }
}

fn document_part(document: &Document) -> Result<Part, ApiError> {
    let part = Part::bytes(document.bytes.clone())
        .file_name(document.name.clone())
        .mime_str(&document.mime_type)?;
    Ok(part)
}

impl RecruitApi for RecruitClient {
    async fn process_job_description(
        &self,
        document: &Document,
    ) -> Result<FormattedTextResponse, ApiError> {
        let url = self.endpoint("job-description/process");
        tracing::debug!(%url, file = %document.name, bytes = document.size(), "processing job description");

        let form = Form::new().part("file", document_part(document)?);
        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_json(response).await
    }

    async fn generate_job_description(
        &self,
        request: &GenerateRequest,
    ) -> Result<FormattedTextResponse, ApiError> {
        let url = self.endpoint("job-description/generate");
        tracing::debug!(%url, job_title = %request.job_title, "generating job description");

        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn match_and_score(
        &self,
        job_description: &str,
        resumes: &[Document],
    ) -> Result<MatchAndScoreResponse, ApiError> {
        let url = self.endpoint("match-and-score");
        tracing::debug!(%url, resumes = resumes.len(), "matching resumes");

        let mut form = Form::new().text("job_description", job_description.to_string());
        for resume in resumes {
            form = form.part("resumes", document_part(resume)?);
        }
        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_json(response).await
    }
}
