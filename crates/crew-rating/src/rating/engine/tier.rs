use serde::{Deserialize, Serialize};

/// Discrete badge derived from a total's share of its scale maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    PlatinumCrew,
    GoldCrew,
    SilverCrew,
    BronzeCrew,
    EliteTier,
    ProTier,
    BasicTier,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlatinumCrew => "Platinum Crew",
            Self::GoldCrew => "Gold Crew",
            Self::SilverCrew => "Silver Crew",
            Self::BronzeCrew => "Bronze Crew",
            Self::EliteTier => "Elite Tier",
            Self::ProTier => "Pro Tier",
            Self::BasicTier => "Basic Tier",
        }
    }
}

/// Lower bound (inclusive, in percent) at which a tier starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierThreshold {
    pub min_percentage: f64,
    pub tier: Tier,
}

impl TierThreshold {
    pub const fn new(min_percentage: f64, tier: Tier) -> Self {
        Self {
            min_percentage,
            tier,
        }
    }
}

pub fn percentage_of(total: f64, scale_maximum: f64) -> f64 {
    total * 100.0 / scale_maximum
}

/// Walks the table top-down and returns the first tier whose threshold the total reaches.
///
/// Tables end with a 0% entry, so any total inside the scale classifies. `None` only for
/// negative totals or a non-positive scale.
pub fn classify(total: f64, scale_maximum: f64, thresholds: &[TierThreshold]) -> Option<Tier> {
    if scale_maximum <= 0.0 {
        return None;
    }

    let percentage = percentage_of(total, scale_maximum);
    thresholds
        .iter()
        .find(|threshold| percentage >= threshold.min_percentage)
        .map(|threshold| threshold.tier)
}
