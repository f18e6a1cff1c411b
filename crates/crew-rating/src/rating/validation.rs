use super::catalog::QualificationCatalog;
use super::domain::{CrewProfile, PerformanceInputs};
use super::engine::tables::listed_position_points;
use super::error::RatingError;

const NON_NEGATIVE: &str = ">= 0";
const NON_NEGATIVE_DECIMAL: &str = "a finite value >= 0";
const FEEDBACK_RANGE: &str = "1..=5";

/// Reject inputs the engine cannot score. Nothing is clamped or defaulted here.
pub fn validate_inputs(
    profile: &CrewProfile,
    performance: &PerformanceInputs,
    catalog: &QualificationCatalog,
) -> Result<(), RatingError> {
    validate_identity(profile, catalog)?;
    validate_profile_ranges(profile)?;
    validate_performance_ranges(performance)
}

fn validate_identity(
    profile: &CrewProfile,
    catalog: &QualificationCatalog,
) -> Result<(), RatingError> {
    let position = profile.position.trim();
    if position.is_empty() {
        return Err(RatingError::InvalidProfile {
            reason: "position is required".to_string(),
        });
    }

    if profile.vessel_tonnage_class.is_none() {
        return Err(RatingError::InvalidProfile {
            reason: "vessel tonnage class is required".to_string(),
        });
    }

    if !catalog.knows_position(position) && listed_position_points(position).is_none() {
        return Err(RatingError::InvalidProfile {
            reason: format!("position '{position}' is not recognized"),
        });
    }

    Ok(())
}

fn validate_profile_ranges(profile: &CrewProfile) -> Result<(), RatingError> {
    non_negative("yacht_sea_time_months", profile.yacht_sea_time_months)?;
    non_negative("merchant_sea_time_months", profile.merchant_sea_time_months)?;
    non_negative("number_of_yachts_worked", profile.number_of_yachts_worked)?;
    non_negative(
        "longevity_on_last_yacht_months",
        profile.longevity_on_last_yacht_months,
    )?;
    non_negative("sea_miles_logged", profile.sea_miles_logged)?;
    non_negative("largest_vessel_grt", profile.largest_vessel_grt)
}

fn validate_performance_ranges(performance: &PerformanceInputs) -> Result<(), RatingError> {
    non_negative("charters_completed", performance.charters_completed)?;
    non_negative("repeat_charters", performance.repeat_charters)?;
    non_negative("crew_referred", performance.crew_referred)?;
    non_negative("yachts_referred", performance.yachts_referred)?;

    if let Some(revenue) = performance.total_charter_revenue {
        non_negative_decimal("total_charter_revenue", revenue)?;
    }
    if let Some(repeat_guests) = performance.repeat_guest_charters {
        non_negative("repeat_guest_charters", repeat_guests)?;
    }
    if let Some(rating) = performance.guest_feedback_rating {
        if !(1..=5).contains(&rating) {
            return Err(RatingError::out_of_range(
                "guest_feedback_rating",
                rating,
                FEEDBACK_RANGE,
            ));
        }
    }
    if let Some(salary) = performance.monthly_national_salary {
        non_negative_decimal("monthly_national_salary", salary)?;
    }

    for (ocean, count) in &performance.ocean_crossing_counts {
        if *count < 0 {
            return Err(RatingError::out_of_range(
                format!("ocean_crossing_counts.{}", ocean.label()),
                count,
                NON_NEGATIVE,
            ));
        }
    }
    for (canal, count) in &performance.canal_transit_counts {
        if *count < 0 {
            return Err(RatingError::out_of_range(
                format!("canal_transit_counts.{}", canal.label()),
                count,
                NON_NEGATIVE,
            ));
        }
    }

    Ok(())
}

fn non_negative(field: &'static str, value: i64) -> Result<(), RatingError> {
    if value < 0 {
        return Err(RatingError::out_of_range(field, value, NON_NEGATIVE));
    }
    Ok(())
}

fn non_negative_decimal(field: &'static str, value: f64) -> Result<(), RatingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RatingError::out_of_range(
            field,
            value,
            NON_NEGATIVE_DECIMAL,
        ));
    }
    Ok(())
}
