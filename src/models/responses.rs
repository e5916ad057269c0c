use serde::{Deserialize, Serialize};

/// Response for the run-matching endpoint: persisted counts only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchingResponse {
    /// Participants consumed by a pair or trio
    pub matched: usize,
    /// Participants left without a team
    pub unmatched: usize,
    /// Number of trios formed
    pub trios: usize,
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
