use super::CategoryScore;
use crate::rating::error::RatingError;

/// Sums already-clamped category scores and rounds the result to one decimal place.
///
/// A sum outside `[0, scale_maximum]` means a scorer or table is wrong; it is reported
/// instead of clamped.
pub fn aggregate(sub_scores: &[CategoryScore], scale_maximum: f64) -> Result<f64, RatingError> {
    let total: f64 = sub_scores.iter().map(|entry| entry.score).sum();

    if !(0.0..=scale_maximum).contains(&total) {
        return Err(RatingError::ScaleExceeded {
            total,
            scale_maximum,
        });
    }

    Ok(round_to_tenth(total))
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::super::variant::Category;
    use super::*;

    fn entry(category: Category, score: f64) -> CategoryScore {
        CategoryScore {
            category,
            score,
            cap: category.cap(),
        }
    }

    #[test]
    fn rounds_once_after_summing() {
        // Per-category rounding would yield 0.1 + 0.1 + 0.1 = 0.3.
        let scores = [
            entry(Category::Qualifications, 0.14),
            entry(Category::Experience, 0.14),
            entry(Category::Charters, 0.14),
        ];
        assert_eq!(aggregate(&scores, 70.0), Ok(0.4));
    }

    #[test]
    fn sums_soft_skills_and_availability() {
        let scores = [
            entry(Category::ExperienceAndLongevity, 0.0),
            entry(Category::AvailabilityAndMobility, 4.5),
            entry(Category::SoftSkillsAndLanguages, 3.0 * 1.2),
        ];
        assert_eq!(aggregate(&scores, 100.0), Ok(8.1));
    }

    #[test]
    fn empty_scores_total_zero() {
        assert_eq!(aggregate(&[], 70.0), Ok(0.0));
    }

    #[test]
    fn total_above_scale_is_an_error() {
        let scores = [
            entry(Category::Qualifications, 20.0),
            entry(Category::Experience, 20.0),
            entry(Category::Charters, 20.0),
            entry(Category::Contributions, 10.5),
        ];
        match aggregate(&scores, 70.0) {
            Err(RatingError::ScaleExceeded { total, .. }) => assert_eq!(total, 70.5),
            other => panic!("expected scale error, got {other:?}"),
        }
    }

    #[test]
    fn nan_total_is_an_error() {
        let scores = [entry(Category::Qualifications, f64::NAN)];
        assert!(matches!(
            aggregate(&scores, 70.0),
            Err(RatingError::ScaleExceeded { .. })
        ));
    }
}
