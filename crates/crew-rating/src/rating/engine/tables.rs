use super::tier::{Tier, TierThreshold};

/// Points for a recognized certificate of competency.
pub const CERTIFICATE_POINTS: &[(&str, f64)] = &[
    ("Yacht Master", 15.0),
    ("Chief Engineer", 15.0),
    ("Master (Yachts) 3000GT", 15.0),
    ("Master (Yachts) 500GT", 12.0),
    ("Officer of the Watch", 12.0),
    ("Y4 Engineer", 10.0),
    ("ENG 1", 10.0),
];

/// Any non-empty certificate missing from the table.
pub const UNLISTED_CERTIFICATE_POINTS: f64 = 5.0;

pub const POSITION_POINTS: &[(&str, f64)] = &[
    ("Captain", 20.0),
    ("First Officer", 16.0),
    ("Chief Engineer", 16.0),
    ("Second Officer", 13.0),
    ("Second Engineer", 13.0),
    ("Chief Stewardess", 12.0),
    ("Head Chef", 12.0),
    ("Bosun", 10.0),
    ("Third Officer", 10.0),
    ("Chef", 9.0),
    ("Deckhand", 6.0),
    ("Stewardess", 6.0),
];

pub const DEFAULT_POSITION_POINTS: f64 = 5.0;

pub const YCI_THRESHOLDS: &[TierThreshold] = &[
    TierThreshold::new(90.0, Tier::PlatinumCrew),
    TierThreshold::new(75.0, Tier::GoldCrew),
    TierThreshold::new(60.0, Tier::SilverCrew),
    TierThreshold::new(0.0, Tier::BronzeCrew),
];

pub const CRI_THRESHOLDS: &[TierThreshold] = &[
    TierThreshold::new(80.0, Tier::EliteTier),
    TierThreshold::new(60.0, Tier::ProTier),
    TierThreshold::new(0.0, Tier::BasicTier),
];

pub fn certificate_points(certificate: Option<&str>) -> f64 {
    match certificate.map(str::trim).filter(|value| !value.is_empty()) {
        None => 0.0,
        Some(name) => lookup(CERTIFICATE_POINTS, name).unwrap_or(UNLISTED_CERTIFICATE_POINTS),
    }
}

/// Listed points for a position, `None` when the table has no entry for it.
pub fn listed_position_points(position: &str) -> Option<f64> {
    lookup(POSITION_POINTS, position)
}

pub fn position_points(position: &str) -> f64 {
    listed_position_points(position).unwrap_or(DEFAULT_POSITION_POINTS)
}

fn lookup(table: &[(&str, f64)], name: &str) -> Option<f64> {
    let name = name.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, points)| *points)
}
