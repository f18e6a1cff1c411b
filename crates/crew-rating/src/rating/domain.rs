use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RatingError;

/// Vessel-size bracket used to select which qualifications a position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TonnageClass {
    #[serde(rename = "<200GRT", alias = "under_200_grt")]
    Under200,
    #[serde(rename = "<500GRT", alias = "under_500_grt")]
    Under500,
    #[serde(rename = "<3000GRT", alias = "under_3000_grt")]
    Under3000,
}

impl TonnageClass {
    pub const fn ordered() -> [Self; 3] {
        [Self::Under200, Self::Under500, Self::Under3000]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under200 => "<200GRT",
            Self::Under500 => "<500GRT",
            Self::Under3000 => "<3000GRT",
        }
    }
}

impl fmt::Display for TonnageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TonnageClass {
    type Err = RatingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let digits = normalized
            .trim_start_matches('<')
            .trim_start_matches("under")
            .trim_end_matches("grt")
            .trim_end_matches("gt");

        match digits {
            "200" => Ok(Self::Under200),
            "500" => Ok(Self::Under500),
            "3000" => Ok(Self::Under3000),
            _ => Err(RatingError::InvalidProfile {
                reason: format!("unrecognized tonnage class '{}'", raw.trim()),
            }),
        }
    }
}

/// Named ocean for crossing counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ocean {
    Atlantic,
    Pacific,
    Indian,
    Arctic,
    Southern,
}

impl Ocean {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Atlantic,
            Self::Pacific,
            Self::Indian,
            Self::Arctic,
            Self::Southern,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Atlantic => "Atlantic",
            Self::Pacific => "Pacific",
            Self::Indian => "Indian",
            Self::Arctic => "Arctic",
            Self::Southern => "Southern",
        }
    }
}

/// Named canal for transit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Canal {
    Panama,
    Suez,
    Kiel,
    Corinth,
}

impl Canal {
    pub const fn ordered() -> [Self; 4] {
        [Self::Panama, Self::Suez, Self::Kiel, Self::Corinth]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Panama => "Panama",
            Self::Suez => "Suez",
            Self::Kiel => "Kiel",
            Self::Corinth => "Corinth",
        }
    }
}

/// Identity and static attributes of a crew member as captured upstream.
///
/// Integer fields are signed so out-of-range values reported by the form layer reach
/// validation instead of being dropped at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewProfile {
    pub full_name: String,
    pub position: String,
    pub vessel_tonnage_class: Option<TonnageClass>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub yacht_sea_time_months: i64,
    #[serde(default)]
    pub merchant_sea_time_months: i64,
    #[serde(default)]
    pub number_of_yachts_worked: i64,
    #[serde(default)]
    pub longevity_on_last_yacht_months: i64,
    #[serde(default)]
    pub sea_miles_logged: i64,
    #[serde(default)]
    pub largest_vessel_grt: i64,
    #[serde(default)]
    pub primary_certificate_of_competency: Option<String>,
    #[serde(default)]
    pub languages_spoken: BTreeSet<String>,
    #[serde(default)]
    pub held_qualifications: BTreeSet<String>,
}

impl CrewProfile {
    /// Certificate name with surrounding whitespace removed; blank values count as absent.
    pub fn certificate(&self) -> Option<&str> {
        self.primary_certificate_of_competency
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn holds(&self, qualification: &str) -> bool {
        let wanted = qualification.trim();
        self.held_qualifications
            .iter()
            .any(|held| held.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Charter and contribution activity feeding the performance categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInputs {
    #[serde(default)]
    pub charters_completed: i64,
    #[serde(default)]
    pub repeat_charters: i64,
    #[serde(default)]
    pub crew_referred: i64,
    #[serde(default)]
    pub yachts_referred: i64,
    #[serde(default)]
    pub total_charter_revenue: Option<f64>,
    #[serde(default)]
    pub repeat_guest_charters: Option<i64>,
    #[serde(default)]
    pub guest_feedback_rating: Option<i64>,
    #[serde(default)]
    pub leadership_roles_held: BTreeSet<String>,
    #[serde(default)]
    pub monthly_national_salary: Option<f64>,
    #[serde(default)]
    pub ocean_crossing_counts: BTreeMap<Ocean, i64>,
    #[serde(default)]
    pub canal_transit_counts: BTreeMap<Canal, i64>,
}

impl PerformanceInputs {
    /// Saturates at `i64::MAX`; every count is individually unbounded.
    pub fn total_ocean_crossings(&self) -> i64 {
        saturating_total(self.ocean_crossing_counts.values())
    }

    pub fn total_canal_transits(&self) -> i64 {
        saturating_total(self.canal_transit_counts.values())
    }
}

fn saturating_total<'a>(counts: impl Iterator<Item = &'a i64>) -> i64 {
    counts.fold(0i64, |acc, count| acc.saturating_add(*count))
}
