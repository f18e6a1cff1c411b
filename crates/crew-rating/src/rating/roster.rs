use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use super::domain::{Canal, CrewProfile, Ocean, PerformanceInputs, TonnageClass};
use super::engine::{ScoreBreakdown, ScoringEngine, ScoringVariant};
use super::error::RatingError;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster row {row}: {source}")]
    Row { row: usize, source: RatingError },
}

/// One crew member read from a roster file. `row` is the 1-based data row.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub row: usize,
    pub profile: CrewProfile,
    pub performance: PerformanceInputs,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCrew {
    pub rank: usize,
    pub row: usize,
    pub full_name: String,
    pub position: String,
    pub breakdown: ScoreBreakdown,
}

pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for (idx, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = idx + 1;
        let parsed = record?;
        let (profile, performance) = parsed
            .into_inputs()
            .map_err(|source| RosterError::Row { row, source })?;
        entries.push(RosterEntry {
            row,
            profile,
            performance,
        });
    }

    Ok(entries)
}

pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>, RosterError> {
    let path = path.as_ref();
    let entries = parse_roster(File::open(path)?)?;
    info!(path = %path.display(), rows = entries.len(), "loaded crew roster");
    Ok(entries)
}

/// Scores every entry and orders them by total (descending), then name. The first row that
/// fails to score aborts the whole ranking.
pub fn rank_roster(
    engine: &ScoringEngine,
    entries: &[RosterEntry],
    variant: ScoringVariant,
) -> Result<Vec<RankedCrew>, RosterError> {
    let mut scored = entries
        .iter()
        .map(|entry| {
            engine
                .score(&entry.profile, &entry.performance, variant)
                .map(|breakdown| RankedCrew {
                    rank: 0,
                    row: entry.row,
                    full_name: entry.profile.full_name.clone(),
                    position: entry.profile.position.trim().to_string(),
                    breakdown,
                })
                .map_err(|source| RosterError::Row {
                    row: entry.row,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| {
        b.breakdown
            .total
            .total_cmp(&a.breakdown.total)
            .then_with(|| {
                a.full_name
                    .to_ascii_lowercase()
                    .cmp(&b.full_name.to_ascii_lowercase())
            })
            .then_with(|| a.full_name.cmp(&b.full_name))
    });
    for (idx, crew) in scored.iter_mut().enumerate() {
        crew.rank = idx + 1;
    }

    Ok(scored)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    full_name: String,
    position: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tonnage_class: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nationality: Option<String>,
    #[serde(default)]
    yacht_sea_time_months: Option<i64>,
    #[serde(default)]
    merchant_sea_time_months: Option<i64>,
    #[serde(default)]
    yachts_worked: Option<i64>,
    #[serde(default)]
    longevity_on_last_yacht_months: Option<i64>,
    #[serde(default)]
    sea_miles_logged: Option<i64>,
    #[serde(default)]
    largest_vessel_grt: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    certificate: Option<String>,
    #[serde(default)]
    languages: String,
    #[serde(default)]
    qualifications: String,
    #[serde(default)]
    charters_completed: Option<i64>,
    #[serde(default)]
    repeat_charters: Option<i64>,
    #[serde(default)]
    crew_referred: Option<i64>,
    #[serde(default)]
    yachts_referred: Option<i64>,
    #[serde(default)]
    total_charter_revenue: Option<f64>,
    #[serde(default)]
    repeat_guest_charters: Option<i64>,
    #[serde(default)]
    guest_feedback_rating: Option<i64>,
    #[serde(default)]
    leadership_roles: String,
    #[serde(default)]
    monthly_national_salary: Option<f64>,
    #[serde(default)]
    atlantic_crossings: Option<i64>,
    #[serde(default)]
    pacific_crossings: Option<i64>,
    #[serde(default)]
    indian_crossings: Option<i64>,
    #[serde(default)]
    arctic_crossings: Option<i64>,
    #[serde(default)]
    southern_crossings: Option<i64>,
    #[serde(default)]
    panama_transits: Option<i64>,
    #[serde(default)]
    suez_transits: Option<i64>,
    #[serde(default)]
    kiel_transits: Option<i64>,
    #[serde(default)]
    corinth_transits: Option<i64>,
}

impl RosterRow {
    fn into_inputs(self) -> Result<(CrewProfile, PerformanceInputs), RatingError> {
        let vessel_tonnage_class = self
            .tonnage_class
            .as_deref()
            .map(str::parse::<TonnageClass>)
            .transpose()?;

        let ocean_crossing_counts = counts([
            (Ocean::Atlantic, self.atlantic_crossings),
            (Ocean::Pacific, self.pacific_crossings),
            (Ocean::Indian, self.indian_crossings),
            (Ocean::Arctic, self.arctic_crossings),
            (Ocean::Southern, self.southern_crossings),
        ]);
        let canal_transit_counts = counts([
            (Canal::Panama, self.panama_transits),
            (Canal::Suez, self.suez_transits),
            (Canal::Kiel, self.kiel_transits),
            (Canal::Corinth, self.corinth_transits),
        ]);

        let profile = CrewProfile {
            full_name: self.full_name,
            position: self.position,
            vessel_tonnage_class,
            nationality: self.nationality,
            yacht_sea_time_months: self.yacht_sea_time_months.unwrap_or(0),
            merchant_sea_time_months: self.merchant_sea_time_months.unwrap_or(0),
            number_of_yachts_worked: self.yachts_worked.unwrap_or(0),
            longevity_on_last_yacht_months: self.longevity_on_last_yacht_months.unwrap_or(0),
            sea_miles_logged: self.sea_miles_logged.unwrap_or(0),
            largest_vessel_grt: self.largest_vessel_grt.unwrap_or(0),
            primary_certificate_of_competency: self.certificate,
            languages_spoken: split_set(&self.languages),
            held_qualifications: split_set(&self.qualifications),
        };

        let performance = PerformanceInputs {
            charters_completed: self.charters_completed.unwrap_or(0),
            repeat_charters: self.repeat_charters.unwrap_or(0),
            crew_referred: self.crew_referred.unwrap_or(0),
            yachts_referred: self.yachts_referred.unwrap_or(0),
            total_charter_revenue: self.total_charter_revenue,
            repeat_guest_charters: self.repeat_guest_charters,
            guest_feedback_rating: self.guest_feedback_rating,
            leadership_roles_held: split_set(&self.leadership_roles),
            monthly_national_salary: self.monthly_national_salary,
            ocean_crossing_counts,
            canal_transit_counts,
        };

        Ok((profile, performance))
    }
}

fn counts<K: Ord, const N: usize>(columns: [(K, Option<i64>); N]) -> BTreeMap<K, i64> {
    columns
        .into_iter()
        .filter_map(|(key, count)| count.map(|count| (key, count)))
        .collect()
}

fn split_set(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
