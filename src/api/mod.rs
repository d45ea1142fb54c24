pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_BASE_URL, RecruitApi, RecruitClient};
pub use error::ApiError;
pub use types::{
    CandidateData, CandidateRanking, FormattedTextResponse, GenerateRequest, MatchAnalytics,
    MatchAndScoreResponse,
};
