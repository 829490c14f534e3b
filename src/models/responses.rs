use serde::{Deserialize, Serialize};
use crate::core::Rejection;
use crate::models::domain::Profile;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<Profile>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "nextOffset")]
    pub next_offset: Option<usize>,
}

/// Response for explain endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainMatchResponse {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub matched: bool,
    #[serde(rename = "rejectedBy")]
    pub rejected_by: Option<Rejection>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
