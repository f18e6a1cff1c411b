use serde::Serialize;

use super::catalog::QualificationCatalog;
use super::domain::CrewProfile;
use super::engine::{round_to_tenth, Category, ScoreBreakdown, ScoringVariant, Tier};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub label: &'static str,
    pub score: f64,
    pub cap: f64,
    pub percent_of_cap: f64,
}

/// Display-ready rendering of a breakdown for report and API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub full_name: String,
    pub position: String,
    pub variant: ScoringVariant,
    pub variant_label: &'static str,
    pub categories: Vec<CategoryRow>,
    pub total: f64,
    pub scale_maximum: f64,
    pub percentage: f64,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub missing_qualifications: Vec<String>,
}

impl ScoreReport {
    pub fn from_breakdown(
        breakdown: &ScoreBreakdown,
        catalog: &QualificationCatalog,
        profile: &CrewProfile,
    ) -> Self {
        let categories = breakdown
            .categories
            .iter()
            .map(|entry| CategoryRow {
                category: entry.category,
                label: entry.category.label(),
                score: round_to_tenth(entry.score),
                cap: entry.cap,
                percent_of_cap: round_to_tenth(entry.score * 100.0 / entry.cap),
            })
            .collect();

        ScoreReport {
            full_name: profile.full_name.clone(),
            position: profile.position.trim().to_string(),
            variant: breakdown.variant,
            variant_label: breakdown.variant.label(),
            categories,
            total: breakdown.total,
            scale_maximum: breakdown.scale_maximum,
            percentage: round_to_tenth(breakdown.percentage()),
            tier: breakdown.tier,
            tier_label: breakdown.tier.label(),
            missing_qualifications: missing_qualifications(catalog, profile),
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut lines = vec![format!(
            "{} ({}) - {} {:.1}/{:.0} [{}]",
            self.full_name,
            self.position,
            self.variant_label,
            self.total,
            self.scale_maximum,
            self.tier_label
        )];

        for row in &self.categories {
            lines.push(format!(
                "- {}: {:.1}/{:.0}",
                row.label, row.score, row.cap
            ));
        }

        if self.missing_qualifications.is_empty() {
            lines.push("Missing qualifications: none".to_string());
        } else {
            lines.push(format!(
                "Missing qualifications: {}",
                self.missing_qualifications.join(", ")
            ));
        }

        lines.join("\n")
    }
}

/// Position requirements the crew member does not hold, in catalog order.
pub fn missing_qualifications(catalog: &QualificationCatalog, profile: &CrewProfile) -> Vec<String> {
    let Some(class) = profile.vessel_tonnage_class else {
        return Vec::new();
    };

    catalog
        .requirements_for(class, &profile.position)
        .iter()
        .filter(|requirement| !profile.holds(requirement))
        .cloned()
        .collect()
}
