use crew_rating::config::RatingConfig;
use crew_rating::error::AppError;
use crew_rating::rating::{
    CrewRatingService, RatingId, RatingRecord, RatingRepository, RepositoryError, ScoringVariant,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRatingRepository {
    records: Arc<Mutex<HashMap<RatingId, RatingRecord>>>,
}

impl RatingRepository for InMemoryRatingRepository {
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
        records.sort_by(|a, b| {
            b.rated_at
                .cmp(&a.rated_at)
                .then_with(|| b.rating_id.cmp(&a.rating_id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

pub(crate) fn rating_service(
    config: &RatingConfig,
) -> Result<CrewRatingService<InMemoryRatingRepository>, AppError> {
    let engine = Arc::new(config.build_engine()?);
    Ok(CrewRatingService::with_default_variant(
        engine,
        Arc::new(InMemoryRatingRepository::default()),
        config.default_variant,
    ))
}

pub(crate) fn parse_variant(raw: &str) -> Result<ScoringVariant, String> {
    raw.parse::<ScoringVariant>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crew_rating::rating::{CrewProfile, ScoreBreakdown, Tier};

    fn record(id: &str, minutes_ago: i64) -> RatingRecord {
        RatingRecord {
            rating_id: RatingId(id.to_string()),
            profile: CrewProfile::default(),
            breakdown: ScoreBreakdown {
                variant: ScoringVariant::YciPlus,
                categories: Vec::new(),
                total: 0.0,
                scale_maximum: 70.0,
                tier: Tier::BronzeCrew,
            },
            rated_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let repository = InMemoryRatingRepository::default();
        repository.insert(record("rating-1", 0)).expect("first insert");
        assert!(matches!(
            repository.insert(record("rating-1", 0)),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn recent_returns_newest_first() {
        let repository = InMemoryRatingRepository::default();
        repository.insert(record("rating-old", 30)).expect("insert");
        repository.insert(record("rating-new", 1)).expect("insert");
        repository.insert(record("rating-mid", 10)).expect("insert");

        let ids: Vec<String> = repository
            .recent(2)
            .expect("recent")
            .into_iter()
            .map(|record| record.rating_id.0)
            .collect();
        assert_eq!(ids, vec!["rating-new", "rating-mid"]);
    }

    #[test]
    fn variant_parser_reports_unknown_names() {
        assert_eq!(parse_variant("cri+"), Ok(ScoringVariant::CriPlus));
        assert_eq!(
            parse_variant("abc+"),
            Err("unknown scoring variant 'abc+'".to_string())
        );
    }
}
