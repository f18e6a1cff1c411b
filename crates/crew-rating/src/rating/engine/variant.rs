use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scorers::{self, CategoryScorer};
use super::tables::{CRI_THRESHOLDS, YCI_THRESHOLDS};
use super::tier::TierThreshold;
use crate::rating::error::RatingError;

/// Scoring category. Each one owns a cap and a pure scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Qualifications,
    Experience,
    Charters,
    Contributions,
    ExperienceAndLongevity,
    QualificationsAndCertifications,
    PositionWeighting,
    CharterPerformance,
    NavigatedWaters,
    AvailabilityAndMobility,
    SoftSkillsAndLanguages,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Qualifications => "Qualifications",
            Self::Experience => "Experience",
            Self::Charters => "Charters",
            Self::Contributions => "Contributions",
            Self::ExperienceAndLongevity => "Experience & Longevity",
            Self::QualificationsAndCertifications => "Qualifications & Certifications",
            Self::PositionWeighting => "Position-Based Role Weighting",
            Self::CharterPerformance => "Charter Performance",
            Self::NavigatedWaters => "Navigated Waters",
            Self::AvailabilityAndMobility => "Availability & Mobility",
            Self::SoftSkillsAndLanguages => "Soft Skills & Languages",
        }
    }

    pub const fn cap(self) -> f64 {
        match self {
            Self::Qualifications | Self::Experience | Self::Charters => 20.0,
            Self::Contributions => 10.0,
            Self::ExperienceAndLongevity | Self::QualificationsAndCertifications => 25.0,
            Self::PositionWeighting => 20.0,
            Self::CharterPerformance | Self::NavigatedWaters => 10.0,
            Self::AvailabilityAndMobility | Self::SoftSkillsAndLanguages => 5.0,
        }
    }

    pub fn scorer(self) -> CategoryScorer {
        match self {
            Self::Qualifications => scorers::qualification_coverage,
            Self::Experience => scorers::effective_sea_time,
            Self::Charters => scorers::charter_volume,
            Self::Contributions => scorers::referral_contributions,
            Self::ExperienceAndLongevity => scorers::experience_and_longevity,
            Self::QualificationsAndCertifications => scorers::certifications,
            Self::PositionWeighting => scorers::position_weighting,
            Self::CharterPerformance => scorers::charter_performance,
            Self::NavigatedWaters => scorers::navigated_waters,
            Self::AvailabilityAndMobility => scorers::availability,
            Self::SoftSkillsAndLanguages => scorers::soft_skills,
        }
    }
}

/// Registered scoring presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringVariant {
    #[serde(rename = "yci_plus", alias = "yci+")]
    YciPlus,
    #[serde(rename = "cri_plus", alias = "cri+")]
    CriPlus,
}

/// Formulas, caps, scale and tier table that make up one variant.
#[derive(Debug, Serialize)]
pub struct VariantPreset {
    pub variant: ScoringVariant,
    pub label: &'static str,
    pub scale_maximum: f64,
    pub categories: &'static [Category],
    pub thresholds: &'static [TierThreshold],
}

static YCI_PLUS: VariantPreset = VariantPreset {
    variant: ScoringVariant::YciPlus,
    label: "YCI+",
    scale_maximum: 70.0,
    categories: &[
        Category::Qualifications,
        Category::Experience,
        Category::Charters,
        Category::Contributions,
    ],
    thresholds: YCI_THRESHOLDS,
};

static CRI_PLUS: VariantPreset = VariantPreset {
    variant: ScoringVariant::CriPlus,
    label: "CRI+",
    scale_maximum: 100.0,
    categories: &[
        Category::ExperienceAndLongevity,
        Category::QualificationsAndCertifications,
        Category::PositionWeighting,
        Category::CharterPerformance,
        Category::NavigatedWaters,
        Category::AvailabilityAndMobility,
        Category::SoftSkillsAndLanguages,
    ],
    thresholds: CRI_THRESHOLDS,
};

impl ScoringVariant {
    pub const fn registered() -> [Self; 2] {
        [Self::YciPlus, Self::CriPlus]
    }

    pub fn preset(self) -> &'static VariantPreset {
        match self {
            Self::YciPlus => &YCI_PLUS,
            Self::CriPlus => &CRI_PLUS,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::YciPlus => "yci_plus",
            Self::CriPlus => "cri_plus",
        }
    }

    pub fn label(self) -> &'static str {
        self.preset().label
    }
}

impl fmt::Display for ScoringVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoringVariant {
    type Err = RatingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yci+" | "yci_plus" | "yciplus" | "yci-plus" => Ok(Self::YciPlus),
            "cri+" | "cri_plus" | "criplus" | "cri-plus" => Ok(Self::CriPlus),
            _ => Err(RatingError::UnknownVariant(raw.trim().to_string())),
        }
    }
}
