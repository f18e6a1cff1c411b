use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::engine::{ScoringVariant, TierThreshold};
use super::repository::{RatingId, RatingRepository, RepositoryError};
use super::service::{CrewRatingService, RatingRequest, RatingServiceError};

const RECENT_LIMIT: usize = 20;

/// Router builder exposing scoring, lookup, and preset endpoints.
pub fn rating_router<R>(service: Arc<CrewRatingService<R>>) -> Router
where
    R: RatingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/ratings",
            post(rate_handler::<R>).get(recent_handler::<R>),
        )
        .route("/api/v1/ratings/preview", post(preview_handler::<R>))
        .route("/api/v1/ratings/variants", get(variants_handler))
        .route("/api/v1/ratings/:rating_id", get(status_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct VariantSummary {
    pub(crate) variant: ScoringVariant,
    pub(crate) label: &'static str,
    pub(crate) scale_maximum: f64,
    pub(crate) categories: Vec<&'static str>,
    pub(crate) tiers: &'static [TierThreshold],
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<CrewRatingService<R>>>,
    axum::Json(request): axum::Json<RatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
{
    match service.preview(&request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rate_handler<R>(
    State(service): State<Arc<CrewRatingService<R>>>,
    axum::Json(request): axum::Json<RatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
{
    match service.rate(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(service.view(&record))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<CrewRatingService<R>>>,
    Path(rating_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
{
    match service.get(&RatingId(rating_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(service.view(&record))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recent_handler<R>(
    State(service): State<Arc<CrewRatingService<R>>>,
) -> Response
where
    R: RatingRepository + 'static,
{
    match service.recent(RECENT_LIMIT) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| service.view(record)).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn variants_handler() -> axum::Json<Vec<VariantSummary>> {
    let summaries = ScoringVariant::registered()
        .into_iter()
        .map(|variant| {
            let preset = variant.preset();
            VariantSummary {
                variant,
                label: preset.label,
                scale_maximum: preset.scale_maximum,
                categories: preset.categories.iter().map(|c| c.label()).collect(),
                tiers: preset.thresholds,
            }
        })
        .collect();
    axum::Json(summaries)
}

fn error_response(err: RatingServiceError) -> Response {
    let status = match &err {
        RatingServiceError::Rating(rating) if rating.is_input_error() => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RatingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RatingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RatingServiceError::Rating(_) | RatingServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
