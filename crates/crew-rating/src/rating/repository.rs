use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::CrewProfile;
use super::engine::ScoreBreakdown;
use super::report::ScoreReport;

/// Identifier minted by the rating service when a breakdown is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatingId(pub String);

/// Stored breakdown alongside the profile it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rating_id: RatingId,
    pub profile: CrewProfile,
    pub breakdown: ScoreBreakdown,
    pub rated_at: DateTime<Utc>,
}

/// Storage abstraction so hosts can plug in their own persistence.
pub trait RatingRepository: Send + Sync {
    fn insert(&self, record: RatingRecord) -> Result<RatingRecord, RepositoryError>;
    fn fetch(&self, id: &RatingId) -> Result<Option<RatingRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<RatingRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Response shape for a stored rating.
#[derive(Debug, Clone, Serialize)]
pub struct RatingRecordView {
    pub rating_id: RatingId,
    pub rated_at: DateTime<Utc>,
    pub report: ScoreReport,
}
