//! Crew rating: qualification catalog, category scorers, aggregation, tiering, and the
//! thin service/router layer hosts use to expose them.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;
pub mod report;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, QualificationCatalog, QualificationRequirement};
pub use domain::{Canal, CrewProfile, Ocean, PerformanceInputs, TonnageClass};
pub use engine::{
    Category, CategoryScore, ScoreBreakdown, ScoringEngine, ScoringVariant, Tier, TierThreshold,
    VariantPreset,
};
pub use error::RatingError;
pub use report::{CategoryRow, ScoreReport};
pub use repository::{
    RatingId, RatingRecord, RatingRecordView, RatingRepository, RepositoryError,
};
pub use roster::{load_roster, parse_roster, rank_roster, RankedCrew, RosterEntry, RosterError};
pub use router::rating_router;
pub use service::{CrewRatingService, RatingRequest, RatingServiceError};
pub use validation::validate_inputs;
