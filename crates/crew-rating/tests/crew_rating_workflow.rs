//! End-to-end scoring through the public engine, service facade and HTTP router.

mod common {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::{Arc, Mutex};

    use crew_rating::rating::{
        CrewProfile, CrewRatingService, PerformanceInputs, RatingId, RatingRecord,
        RatingRepository, RepositoryError, ScoringEngine, TonnageClass,
    };

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    pub(super) fn captain() -> CrewProfile {
        CrewProfile {
            full_name: "Marta Ilic".to_string(),
            position: "Captain".to_string(),
            vessel_tonnage_class: Some(TonnageClass::Under3000),
            nationality: Some("Croatian".to_string()),
            yacht_sea_time_months: 180,
            merchant_sea_time_months: 60,
            number_of_yachts_worked: 10,
            longevity_on_last_yacht_months: 48,
            sea_miles_logged: 95_000,
            largest_vessel_grt: 2_400,
            primary_certificate_of_competency: Some("Master (Yachts) 3000GT".to_string()),
            languages_spoken: set(&["English", "Croatian", "Italian", "German", "French"]),
            held_qualifications: BTreeSet::new(),
        }
    }

    pub(super) fn captain_performance() -> PerformanceInputs {
        let mut performance = PerformanceInputs {
            charters_completed: 80,
            repeat_charters: 6,
            crew_referred: 4,
            yachts_referred: 1,
            total_charter_revenue: Some(900_000.0),
            repeat_guest_charters: Some(9),
            guest_feedback_rating: Some(5),
            leadership_roles_held: set(&["Master", "Safety Officer"]),
            monthly_national_salary: Some(12_500.0),
            ..PerformanceInputs::default()
        };
        performance
            .ocean_crossing_counts
            .insert(crew_rating::rating::Ocean::Atlantic, 14);
        performance
            .canal_transit_counts
            .insert(crew_rating::rating::Canal::Panama, 6);
        performance
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<HashMap<RatingId, RatingRecord>>,
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
            Ok(guard.values().take(limit).cloned().collect())
        }
    }

    pub(super) fn service() -> Arc<CrewRatingService<MemoryRepository>> {
        Arc::new(CrewRatingService::new(
            Arc::new(ScoringEngine::standard()),
            Arc::new(MemoryRepository::default()),
        ))
    }
}

use common::*;
use crew_rating::rating::{
    rating_router, Category, ScoringEngine, ScoringVariant, Tier,
};
use serde_json::json;
use tower::ServiceExt;

#[test]
fn seasoned_captain_reaches_elite_on_cri_plus() {
    let breakdown = ScoringEngine::standard()
        .score(&captain(), &captain_performance(), ScoringVariant::CriPlus)
        .expect("captain scores");

    assert_eq!(breakdown.score_for(Category::ExperienceAndLongevity), Some(25.0));
    assert_eq!(
        breakdown.score_for(Category::QualificationsAndCertifications),
        Some(18.0)
    );
    assert_eq!(breakdown.score_for(Category::PositionWeighting), Some(20.0));
    assert_eq!(breakdown.score_for(Category::CharterPerformance), Some(10.0));
    assert_eq!(breakdown.score_for(Category::NavigatedWaters), Some(10.0));
    assert_eq!(breakdown.score_for(Category::SoftSkillsAndLanguages), Some(5.0));
    assert_eq!(breakdown.total, 92.5);
    assert_eq!(breakdown.tier, Tier::EliteTier);
}

#[test]
fn captain_without_listed_qualifications_stays_low_on_yci_plus() {
    let breakdown = ScoringEngine::standard()
        .score(&captain(), &captain_performance(), ScoringVariant::YciPlus)
        .expect("captain scores");

    assert_eq!(breakdown.score_for(Category::Qualifications), Some(0.0));
    assert_eq!(breakdown.score_for(Category::Experience), Some(15.5));
    assert_eq!(breakdown.score_for(Category::Charters), Some(20.0));
    assert_eq!(breakdown.score_for(Category::Contributions), Some(5.0));
    assert_eq!(breakdown.total, 40.5);
    assert_eq!(breakdown.tier, Tier::BronzeCrew);
}

#[tokio::test]
async fn rate_then_fetch_over_http() {
    let router = rating_router(service());

    let body = json!({
        "profile": captain(),
        "performance": captain_performance(),
        "variant": "cri_plus",
    });
    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/ratings")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let created: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
    let rating_id = created["rating_id"].as_str().expect("rating id").to_string();
    assert_eq!(created["report"]["tier_label"], "Elite Tier");
    assert!(created["report"]["missing_qualifications"]
        .as_array()
        .is_some_and(|missing| !missing.is_empty()));

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/ratings/{rating_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[tokio::test]
async fn unknown_variant_in_payload_is_rejected() {
    let router = rating_router(service());

    let body = json!({
        "profile": captain(),
        "variant": "abc+",
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/ratings/preview")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
