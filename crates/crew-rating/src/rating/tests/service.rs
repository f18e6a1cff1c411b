use super::common::*;
use crate::rating::engine::{ScoringVariant, Tier};
use crate::rating::repository::{RatingId, RatingRepository, RepositoryError};
use crate::rating::{CrewRatingService, RatingError, RatingServiceError};
use std::sync::Arc;

#[test]
fn preview_does_not_persist() {
    let (service, repository) = build_service();

    let report = service.preview(&request(None)).expect("preview succeeds");

    assert_eq!(report.variant, ScoringVariant::YciPlus);
    assert_eq!(report.total, 29.1);
    assert_eq!(repository.len(), 0);
}

#[test]
fn rate_stores_breakdown_under_new_id() {
    let (service, repository) = build_service();

    let record = service
        .rate(request(Some(ScoringVariant::CriPlus)))
        .expect("rating stored");

    assert!(record.rating_id.0.starts_with("rating-"));
    assert_eq!(record.breakdown.variant, ScoringVariant::CriPlus);
    let stored = repository
        .fetch(&record.rating_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn rate_mints_distinct_ids() {
    let (service, _) = build_service();
    let first = service.rate(request(None)).expect("first stored");
    let second = service.rate(request(None)).expect("second stored");
    assert_ne!(first.rating_id, second.rating_id);
}

#[test]
fn default_variant_applies_when_request_omits_one() {
    let repository = Arc::new(MemoryRepository::default());
    let service = CrewRatingService::with_default_variant(
        Arc::new(engine()),
        repository,
        ScoringVariant::CriPlus,
    );

    let report = service.preview(&request(None)).expect("preview succeeds");
    assert_eq!(report.variant, ScoringVariant::CriPlus);
    assert!(matches!(
        report.tier,
        Tier::EliteTier | Tier::ProTier | Tier::BasicTier
    ));
}

#[test]
fn rate_propagates_rating_errors_without_storing() {
    let (service, repository) = build_service();
    let mut invalid = request(None);
    invalid.profile.vessel_tonnage_class = None;

    match service.rate(invalid) {
        Err(RatingServiceError::Rating(RatingError::InvalidProfile { .. })) => {}
        other => panic!("expected invalid profile, got {other:?}"),
    }
    assert_eq!(repository.len(), 0);
}

#[test]
fn rate_propagates_repository_conflicts() {
    let service = CrewRatingService::new(Arc::new(engine()), Arc::new(ConflictRepository));

    match service.rate(request(None)) {
        Err(RatingServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&RatingId("rating-missing".to_string())) {
        Err(RatingServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn recent_surfaces_unavailable_repository() {
    let service = CrewRatingService::new(Arc::new(engine()), Arc::new(UnavailableRepository));

    assert!(matches!(
        service.recent(5),
        Err(RatingServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn view_renders_report_for_stored_record() {
    let (service, _) = build_service();
    let record = service.rate(request(None)).expect("rating stored");

    let view = service.view(&record);
    assert_eq!(view.rating_id, record.rating_id);
    assert_eq!(view.report.full_name, "Ana Ferreira");
    assert_eq!(view.report.missing_qualifications.len(), 2);
}
