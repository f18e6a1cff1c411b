/// Failures raised while scoring a crew profile. No partial breakdown accompanies any of them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("invalid crew profile: {reason}")]
    InvalidProfile { reason: String },
    #[error("{field} is out of range (found {value}, expected {expected})")]
    OutOfRangeInput {
        field: String,
        value: String,
        expected: &'static str,
    },
    #[error("unknown scoring variant '{0}'")]
    UnknownVariant(String),
    #[error("category total {total} falls outside the 0..={scale_maximum} scale")]
    ScaleExceeded { total: f64, scale_maximum: f64 },
}

impl RatingError {
    pub(crate) fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::OutOfRangeInput {
            field: field.into(),
            value: value.to_string(),
            expected,
        }
    }

    /// Errors caused by caller-supplied data rather than a scoring table defect.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, RatingError::ScaleExceeded { .. })
    }
}
