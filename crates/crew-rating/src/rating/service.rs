use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::domain::{CrewProfile, PerformanceInputs};
use super::engine::{ScoreBreakdown, ScoringEngine, ScoringVariant};
use super::error::RatingError;
use super::report::ScoreReport;
use super::repository::{
    RatingId, RatingRecord, RatingRecordView, RatingRepository, RepositoryError,
};

/// Inbound scoring request. Without a variant the service default applies.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRequest {
    pub profile: CrewProfile,
    #[serde(default)]
    pub performance: PerformanceInputs,
    #[serde(default)]
    pub variant: Option<ScoringVariant>,
}

/// Service composing the scoring engine with host-provided persistence.
pub struct CrewRatingService<R> {
    engine: Arc<ScoringEngine>,
    repository: Arc<R>,
    default_variant: ScoringVariant,
}

static RATING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_rating_id() -> RatingId {
    let id = RATING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RatingId(format!("rating-{id:06}"))
}

impl<R> CrewRatingService<R>
where
    R: RatingRepository + 'static,
{
    pub fn new(engine: Arc<ScoringEngine>, repository: Arc<R>) -> Self {
        Self::with_default_variant(engine, repository, ScoringVariant::YciPlus)
    }

    pub fn with_default_variant(
        engine: Arc<ScoringEngine>,
        repository: Arc<R>,
        default_variant: ScoringVariant,
    ) -> Self {
        Self {
            engine,
            repository,
            default_variant,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn default_variant(&self) -> ScoringVariant {
        self.default_variant
    }

    /// Score without storing anything.
    pub fn preview(&self, request: &RatingRequest) -> Result<ScoreReport, RatingServiceError> {
        let breakdown = self.breakdown(request)?;
        Ok(ScoreReport::from_breakdown(
            &breakdown,
            self.engine.catalog(),
            &request.profile,
        ))
    }

    /// Score and persist the breakdown under a freshly minted id.
    pub fn rate(&self, request: RatingRequest) -> Result<RatingRecord, RatingServiceError> {
        let breakdown = self.breakdown(&request)?;
        let record = RatingRecord {
            rating_id: next_rating_id(),
            profile: request.profile,
            breakdown,
            rated_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            rating_id = %stored.rating_id.0,
            variant = stored.breakdown.variant.id(),
            total = stored.breakdown.total,
            "stored crew rating"
        );
        Ok(stored)
    }

    pub fn get(&self, rating_id: &RatingId) -> Result<RatingRecord, RatingServiceError> {
        let record = self
            .repository
            .fetch(rating_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<RatingRecord>, RatingServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    pub fn view(&self, record: &RatingRecord) -> RatingRecordView {
        RatingRecordView {
            rating_id: record.rating_id.clone(),
            rated_at: record.rated_at,
            report: ScoreReport::from_breakdown(
                &record.breakdown,
                self.engine.catalog(),
                &record.profile,
            ),
        }
    }

    fn breakdown(&self, request: &RatingRequest) -> Result<ScoreBreakdown, RatingError> {
        let variant = request.variant.unwrap_or(self.default_variant);
        self.engine
            .score(&request.profile, &request.performance, variant)
    }
}

/// Error raised by the rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
