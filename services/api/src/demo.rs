use crate::infra::parse_variant;
use clap::Args;
use crew_rating::config::{AppConfig, RatingConfig};
use crew_rating::error::AppError;
use crew_rating::rating::{
    load_roster, parse_roster, rank_roster, CrewProfile, Ocean, PerformanceInputs, RankedCrew,
    RatingRequest, ScoreReport, ScoringEngine, ScoringVariant, TonnageClass,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEMO_ROSTER: &str = include_str!("../../../demos/crew_roster.csv");

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `profile`, optional `performance` and optional `variant`
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Override the variant named in the file or configured as default
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
    /// Qualification catalog JSON replacing the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Roster CSV export, one crew member per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Variant used for every row (defaults to the configured variant)
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
    /// Qualification catalog JSON replacing the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the leaderboard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only run the demo for one variant
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LeaderboardRow<'a> {
    pub(crate) rank: usize,
    pub(crate) full_name: &'a str,
    pub(crate) position: &'a str,
    pub(crate) total: f64,
    pub(crate) scale_maximum: f64,
    pub(crate) tier: &'static str,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        profile,
        variant,
        catalog,
    } = args;

    let rating = rating_config(catalog)?;
    let engine = rating.build_engine()?;
    let mut request = load_request(&profile)?;
    if variant.is_some() {
        request.variant = variant;
    }

    println!("{}", score_text(&engine, &request, rating.default_variant)?);
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let RosterArgs {
        csv,
        variant,
        catalog,
        json,
    } = args;

    let rating = rating_config(catalog)?;
    let engine = rating.build_engine()?;
    let variant = variant.unwrap_or(rating.default_variant);
    let entries = load_roster(&csv)?;
    let ranked = rank_roster(&engine, &entries, variant)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&leaderboard(&ranked))?);
    } else {
        println!("{}", leaderboard_text(variant, &ranked));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let variants = match args.variant {
        Some(variant) => vec![variant],
        None => ScoringVariant::registered().to_vec(),
    };

    let engine = ScoringEngine::standard();
    let entries = parse_roster(DEMO_ROSTER.as_bytes())?;

    println!("Crew rating demo");
    for variant in variants {
        println!("\n== {} ==", variant.label());
        for request in sample_requests() {
            println!("\n{}", score_text(&engine, &request, variant)?);
        }

        let ranked = rank_roster(&engine, &entries, variant)?;
        println!("\n{}", leaderboard_text(variant, &ranked));
    }
    Ok(())
}

fn rating_config(catalog: Option<PathBuf>) -> Result<RatingConfig, AppError> {
    let mut rating = AppConfig::load()?.rating;
    if catalog.is_some() {
        rating.catalog_path = catalog;
    }
    Ok(rating)
}

pub(crate) fn load_request(path: &Path) -> Result<RatingRequest, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Renders one request; `fallback` applies when the request names no variant.
pub(crate) fn score_text(
    engine: &ScoringEngine,
    request: &RatingRequest,
    fallback: ScoringVariant,
) -> Result<String, AppError> {
    let variant = request.variant.unwrap_or(fallback);
    let breakdown = engine.score(&request.profile, &request.performance, variant)?;
    Ok(ScoreReport::from_breakdown(&breakdown, engine.catalog(), &request.profile).render_text())
}

pub(crate) fn leaderboard(ranked: &[RankedCrew]) -> Vec<LeaderboardRow<'_>> {
    ranked
        .iter()
        .map(|crew| LeaderboardRow {
            rank: crew.rank,
            full_name: &crew.full_name,
            position: &crew.position,
            total: crew.breakdown.total,
            scale_maximum: crew.breakdown.scale_maximum,
            tier: crew.breakdown.tier.label(),
        })
        .collect()
}

pub(crate) fn leaderboard_text(variant: ScoringVariant, ranked: &[RankedCrew]) -> String {
    let mut lines = vec![format!("{} leaderboard", variant.label())];
    for row in leaderboard(ranked) {
        lines.push(format!(
            "{:>2}. {} ({}) {:.1}/{:.0} [{}]",
            row.rank, row.full_name, row.position, row.total, row.scale_maximum, row.tier
        ));
    }
    lines.join("\n")
}

fn names(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sample_requests() -> Vec<RatingRequest> {
    let mut bosun_performance = PerformanceInputs {
        charters_completed: 30,
        repeat_charters: 4,
        crew_referred: 1,
        guest_feedback_rating: Some(4),
        leadership_roles_held: names(&["Tender Driver"]),
        ..PerformanceInputs::default()
    };
    bosun_performance
        .ocean_crossing_counts
        .insert(Ocean::Atlantic, 3);

    vec![
        RatingRequest {
            profile: CrewProfile {
                full_name: "Ana Ferreira".to_string(),
                position: "First Officer".to_string(),
                vessel_tonnage_class: Some(TonnageClass::Under200),
                yacht_sea_time_months: 24,
                merchant_sea_time_months: 12,
                primary_certificate_of_competency: Some("Yacht Master".to_string()),
                languages_spoken: names(&["English", "Portuguese"]),
                held_qualifications: names(&[
                    "STCW Basic Training",
                    "ENG1 Medical",
                    "VHF Short Range Certificate",
                ]),
                ..CrewProfile::default()
            },
            performance: PerformanceInputs {
                charters_completed: 25,
                repeat_charters: 5,
                crew_referred: 3,
                yachts_referred: 2,
                ..PerformanceInputs::default()
            },
            variant: None,
        },
        RatingRequest {
            profile: CrewProfile {
                full_name: "Tom Okafor".to_string(),
                position: "Bosun".to_string(),
                vessel_tonnage_class: Some(TonnageClass::Under500),
                yacht_sea_time_months: 72,
                number_of_yachts_worked: 4,
                longevity_on_last_yacht_months: 30,
                sea_miles_logged: 40_000,
                largest_vessel_grt: 460,
                primary_certificate_of_competency: Some("Officer of the Watch".to_string()),
                languages_spoken: names(&["English", "Yoruba"]),
                held_qualifications: names(&[
                    "STCW Basic Training",
                    "ENG1 Medical",
                    "Powerboat Level 2",
                    "Security Awareness",
                ]),
                ..CrewProfile::default()
            },
            performance: bosun_performance,
            variant: None,
        },
    ]
}
