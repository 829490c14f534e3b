use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Profile;

/// Request to filter a candidate pool for one subject
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub subject: Profile,
    #[validate(nested)]
    #[serde(default)]
    pub pool: Vec<Profile>,
    /// Page size; falls back to the configured default and is capped at the configured max
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub offset: usize,
}

/// Request to explain the verdict for a single subject/candidate pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplainMatchRequest {
    #[validate(nested)]
    pub subject: Profile,
    #[validate(nested)]
    pub candidate: Profile,
}
