use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::rating::domain::{CrewProfile, PerformanceInputs, TonnageClass};
use crate::rating::engine::ScoringEngine;
use crate::rating::repository::{RatingId, RatingRecord, RatingRepository, RepositoryError};
use crate::rating::service::{CrewRatingService, RatingRequest};
use crate::rating::{rating_router, ScoringVariant};

pub(super) fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// First Officer on a small yacht holding three of the five required qualifications.
pub(super) fn first_officer_profile() -> CrewProfile {
    CrewProfile {
        full_name: "Ana Ferreira".to_string(),
        position: "First Officer".to_string(),
        vessel_tonnage_class: Some(TonnageClass::Under200),
        nationality: Some("Portuguese".to_string()),
        yacht_sea_time_months: 24,
        merchant_sea_time_months: 12,
        number_of_yachts_worked: 3,
        longevity_on_last_yacht_months: 14,
        sea_miles_logged: 18_000,
        largest_vessel_grt: 180,
        primary_certificate_of_competency: Some("Yacht Master".to_string()),
        languages_spoken: set(&["English", "Portuguese"]),
        held_qualifications: set(&[
            "STCW Basic Training",
            "ENG1 Medical",
            "VHF Short Range Certificate",
        ]),
    }
}

pub(super) fn first_officer_performance() -> PerformanceInputs {
    PerformanceInputs {
        charters_completed: 25,
        repeat_charters: 5,
        crew_referred: 3,
        yachts_referred: 2,
        ..PerformanceInputs::default()
    }
}

/// Deckhand with nothing but three languages on record.
pub(super) fn multilingual_deckhand() -> CrewProfile {
    CrewProfile {
        full_name: "Luc Marchand".to_string(),
        position: "Deckhand".to_string(),
        vessel_tonnage_class: Some(TonnageClass::Under500),
        languages_spoken: set(&["English", "Spanish", "French"]),
        ..CrewProfile::default()
    }
}

pub(super) fn request(variant: Option<ScoringVariant>) -> RatingRequest {
    RatingRequest {
        profile: first_officer_profile(),
        performance: first_officer_performance(),
        variant,
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::standard()
}

pub(super) fn build_service() -> (CrewRatingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CrewRatingService::new(Arc::new(engine()), repository.clone());
    (service, repository)
}

pub(super) fn rating_router_with_service(
    service: CrewRatingService<MemoryRepository>,
) -> axum::Router {
    rating_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RatingId, RatingRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl RatingRepository for MemoryRepository {
    fn insert(&self, record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.rating_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.rating_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RatingId) -> Result<Option<RatingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<RatingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.rating_id.cmp(&a.rating_id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl RatingRepository for ConflictRepository {
    fn insert(&self, _record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &RatingId) -> Result<Option<RatingRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<RatingRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl RatingRepository for UnavailableRepository {
    fn insert(&self, _record: RatingRecord) -> Result<RatingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RatingId) -> Result<Option<RatingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<RatingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
