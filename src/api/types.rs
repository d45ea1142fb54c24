//! Request and response bodies of the recruiting API.
//!
//! Field names follow the server's snake_case JSON. Response fields the
//! client can live without carry `#[serde(default)]` so a sparse payload
//! still decodes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of both `/job-description/process` and `/job-description/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTextResponse {
    /// The job description as formatted by the server.
    pub formatted_text: String,
    /// Server-side processing time in seconds.
    #[serde(default)]
    pub processing_time: f64,
}

/// Body of `/job-description/generate`. Every field is a free-form string;
/// empty strings are sent for fields the user left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub job_title: String,
    pub experience: String,
    pub company: String,
    pub job_type: String,
    pub must_have_skills: String,
    pub industry: String,
    pub location: String,
}

/// Response of `/match-and-score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAndScoreResponse {
    #[serde(default)]
    pub job_description: String,
    /// Per-candidate details keyed by candidate id.
    #[serde(default)]
    pub candidates_data: HashMap<String, CandidateData>,
    pub analytics: MatchAnalytics,
}

/// Details the server extracted from one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateData {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub resume_name: String,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// Aggregate scoring results. `candidate_rankings` is the authoritative
/// candidate order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalytics {
    #[serde(default)]
    pub candidates_analyzed: u32,
    #[serde(default)]
    pub average_match_score: f64,
    #[serde(default)]
    pub top_match_score: f64,
    #[serde(default)]
    pub best_candidate: String,
    #[serde(default)]
    pub best_candidate_reason: String,
    #[serde(default)]
    pub candidate_rankings: Vec<CandidateRanking>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRanking {
    /// Key into [`MatchAndScoreResponse::candidates_data`].
    pub candidate_uuid: String,
    #[serde(default)]
    pub candidate_name: String,
    pub match_score: f64,
    pub rank: u32,
    #[serde(default)]
    pub summary: String,
}

/// Optional JSON body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_text_response_from_api_format() {
        let json = r#"{"formatted_text": "Senior Rust Engineer\n...", "processing_time": 1.2345}"#;
        let resp: FormattedTextResponse = serde_json::from_str(json).unwrap();
        assert!(resp.formatted_text.starts_with("Senior Rust Engineer"));
        assert!((resp.processing_time - 1.2345).abs() < f64::EPSILON);
    }

    #[test]
    fn generate_request_uses_server_field_names() {
        let req = GenerateRequest {
            job_title: "Backend Engineer".into(),
            company: "Acme".into(),
            job_type: "full-time".into(),
            must_have_skills: "Rust, Postgres".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["job_title"], "Backend Engineer");
        assert_eq!(value["job_type"], "full-time");
        assert_eq!(value["must_have_skills"], "Rust, Postgres");
        assert_eq!(value["experience"], "");
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn match_response_deserialize_from_api_format() {
        let json = r#"{
            "job_description": "Rust developer",
            "candidates_data": {
                "c-1": {
                    "candidate_name": "Sarah Johnson",
                    "resume_name": "sarah.pdf",
                    "missing_skills": ["GraphQL"],
                    "pros": ["Strong systems background"],
                    "cons": []
                }
            },
            "analytics": {
                "candidates_analyzed": 1,
                "average_match_score": 92.0,
                "top_match_score": 92.0,
                "best_candidate": "Sarah Johnson",
                "best_candidate_reason": "Deep Rust experience",
                "candidate_rankings": [
                    {"candidate_uuid": "c-1", "candidate_name": "Sarah Johnson",
                     "match_score": 92, "rank": 1, "summary": "Excellent fit"}
                ]
            }
        }"#;
        let resp: MatchAndScoreResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates_data["c-1"].resume_name, "sarah.pdf");
        assert_eq!(resp.analytics.candidate_rankings[0].rank, 1);
        assert_eq!(resp.analytics.candidate_rankings[0].match_score, 92.0);
        assert_eq!(resp.analytics.best_candidate_reason, "Deep Rust experience");
    }

    #[test]
    fn match_response_tolerates_sparse_payload() {
        let json = r#"{"analytics": {"candidate_rankings": []}}"#;
        let resp: MatchAndScoreResponse = serde_json::from_str(json).unwrap();
        assert!(resp.candidates_data.is_empty());
        assert_eq!(resp.analytics.candidates_analyzed, 0);
    }

    #[test]
    fn error_body_message_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "nope"}"#).unwrap();
        assert!(body.message.is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"message": "bad file"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("bad file"));
    }
}
