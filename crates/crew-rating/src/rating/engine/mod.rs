mod aggregate;
pub mod scorers;
pub mod tables;
mod tier;
mod variant;

pub use aggregate::{aggregate, round_to_tenth};
pub use tier::{classify, percentage_of, Tier, TierThreshold};
pub use variant::{Category, ScoringVariant, VariantPreset};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::QualificationCatalog;
use super::domain::{CrewProfile, PerformanceInputs};
use super::error::RatingError;
use super::validation::validate_inputs;

/// Stateless scoring façade. Owns only the immutable qualification catalog, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    catalog: QualificationCatalog,
}

impl ScoringEngine {
    pub fn new(catalog: QualificationCatalog) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(QualificationCatalog::standard())
    }

    pub fn catalog(&self) -> &QualificationCatalog {
        &self.catalog
    }

    pub fn score(
        &self,
        profile: &CrewProfile,
        performance: &PerformanceInputs,
        variant: ScoringVariant,
    ) -> Result<ScoreBreakdown, RatingError> {
        if let Err(err) = validate_inputs(profile, performance, &self.catalog) {
            warn!(variant = variant.id(), error = %err, "rejected crew profile");
            return Err(err);
        }

        let preset = variant.preset();
        let requirements = profile
            .vessel_tonnage_class
            .map(|class| self.catalog.requirements_for(class, &profile.position))
            .unwrap_or(&[]);

        let categories: Vec<CategoryScore> = preset
            .categories
            .iter()
            .map(|category| CategoryScore {
                category: *category,
                score: (category.scorer())(profile, performance, requirements),
                cap: category.cap(),
            })
            .collect();

        let total = aggregate(&categories, preset.scale_maximum)?;
        let tier = classify(total, preset.scale_maximum, preset.thresholds).ok_or(
            RatingError::ScaleExceeded {
                total,
                scale_maximum: preset.scale_maximum,
            },
        )?;

        debug!(
            variant = variant.id(),
            position = %profile.position,
            total,
            tier = tier.label(),
            "scored crew profile"
        );

        Ok(ScoreBreakdown {
            variant,
            categories,
            total,
            scale_maximum: preset.scale_maximum,
            tier,
        })
    }

    /// Same as [`ScoringEngine::score`] with the variant looked up by name.
    pub fn score_named(
        &self,
        profile: &CrewProfile,
        performance: &PerformanceInputs,
        variant: &str,
    ) -> Result<ScoreBreakdown, RatingError> {
        let variant = variant.parse::<ScoringVariant>()?;
        self.score(profile, performance, variant)
    }
}

/// One category's contribution to a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub cap: f64,
}

/// Complete, immutable result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub variant: ScoringVariant,
    pub categories: Vec<CategoryScore>,
    pub total: f64,
    pub scale_maximum: f64,
    pub tier: Tier,
}

impl ScoreBreakdown {
    pub fn score_for(&self, category: Category) -> Option<f64> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.score)
    }

    pub fn percentage(&self) -> f64 {
        percentage_of(self.total, self.scale_maximum)
    }
}
