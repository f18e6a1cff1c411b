//! Per-category scorers.
//!
//! Every scorer is a pure function of the profile, the performance inputs and the resolved
//! position requirements, and returns a value already clamped to `[0, cap]`. Values keep
//! full precision; rounding belongs to the aggregator.

use std::collections::BTreeSet;

use super::tables::{certificate_points, position_points};
use super::variant::Category;
use crate::rating::domain::{CrewProfile, PerformanceInputs};

pub type CategoryScorer = fn(&CrewProfile, &PerformanceInputs, &[String]) -> f64;

const MERCHANT_SEA_TIME_WEIGHT: f64 = 0.10;
const HIGH_SALARY_THRESHOLD: f64 = 8_000.0;
const AVAILABILITY_PLACEHOLDER: f64 = 4.5;

fn bounded(value: f64, category: Category) -> f64 {
    value.clamp(0.0, category.cap())
}

fn distinct_count(values: &BTreeSet<String>) -> usize {
    values
        .iter()
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

/// YCI+: share of the position's requirements the crew member holds, scaled to 20.
pub fn qualification_coverage(
    profile: &CrewProfile,
    _performance: &PerformanceInputs,
    requirements: &[String],
) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }

    let held = requirements
        .iter()
        .filter(|requirement| profile.holds(requirement))
        .count();
    let coverage = held as f64 / requirements.len() as f64;
    bounded(coverage * 20.0, Category::Qualifications)
}

/// YCI+: yacht months plus a tenth of merchant months, expressed in years.
pub fn effective_sea_time(
    profile: &CrewProfile,
    _performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let effective_months = profile.yacht_sea_time_months as f64
        + profile.merchant_sea_time_months as f64 * MERCHANT_SEA_TIME_WEIGHT;
    bounded((effective_months / 12.0).min(20.0), Category::Experience)
}

pub fn charter_volume(
    _profile: &CrewProfile,
    performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let raw = performance.charters_completed as f64 / 5.0 + performance.repeat_charters as f64;
    bounded(raw.min(20.0), Category::Charters)
}

pub fn referral_contributions(
    _profile: &CrewProfile,
    performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let crew = performance.crew_referred.min(10) as f64;
    let yachts = performance.yachts_referred.min(10) as f64;
    bounded((crew + yachts).min(10.0), Category::Contributions)
}

/// CRI+: years at sea, yachts worked, tenure on the last yacht and logged miles.
pub fn experience_and_longevity(
    profile: &CrewProfile,
    _performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let years = profile.yacht_sea_time_months as f64 / 12.0;
    let tenure = (years * 2.0).min(10.0);
    let yachts = (profile.number_of_yachts_worked as f64 * 0.5).min(5.0);
    let longevity = (profile.longevity_on_last_yacht_months as f64 * 1.5).min(5.0);
    let miles = (profile.sea_miles_logged as f64 / 10_000.0 * 5.0).min(5.0);
    bounded(
        tenure + yachts + longevity + miles,
        Category::ExperienceAndLongevity,
    )
}

pub fn certifications(
    profile: &CrewProfile,
    _performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let certificate = certificate_points(profile.certificate());
    let vessel_bonus = if profile.largest_vessel_grt > 3000 {
        5.0
    } else if profile.largest_vessel_grt > 500 {
        3.0
    } else {
        0.0
    };
    bounded(
        certificate + vessel_bonus,
        Category::QualificationsAndCertifications,
    )
}

pub fn position_weighting(
    profile: &CrewProfile,
    performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let salary_bonus = match performance.monthly_national_salary {
        Some(salary) if salary > HIGH_SALARY_THRESHOLD => 2.0,
        _ => 0.0,
    };
    bounded(
        position_points(&profile.position) + salary_bonus,
        Category::PositionWeighting,
    )
}

pub fn charter_performance(
    _profile: &CrewProfile,
    performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let revenue = (performance.total_charter_revenue.unwrap_or(0.0) / 100_000.0).min(4.0);
    let repeat_guests = (performance.repeat_guest_charters.unwrap_or(0) as f64 * 0.5).min(3.0);
    let feedback = performance
        .guest_feedback_rating
        .map(|rating| (rating - 1) as f64)
        .unwrap_or(0.0);
    let leadership = distinct_count(&performance.leadership_roles_held) as f64 * 0.5;
    bounded(
        revenue + repeat_guests + feedback + leadership,
        Category::CharterPerformance,
    )
}

pub fn navigated_waters(
    _profile: &CrewProfile,
    performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let oceans = (performance.total_ocean_crossings() as f64 * 0.5).min(6.0);
    let canals = (performance.total_canal_transits() as f64 * 0.8).min(4.0);
    bounded(oceans + canals, Category::NavigatedWaters)
}

/// Fixed placeholder: no availability input is collected yet.
pub fn availability(
    _profile: &CrewProfile,
    _performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    bounded(AVAILABILITY_PLACEHOLDER, Category::AvailabilityAndMobility)
}

pub fn soft_skills(
    profile: &CrewProfile,
    _performance: &PerformanceInputs,
    _requirements: &[String],
) -> f64 {
    let languages = distinct_count(&profile.languages_spoken) as f64;
    bounded((languages * 1.2).min(5.0), Category::SoftSkillsAndLanguages)
}
