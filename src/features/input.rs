//! Prediction Input - Self-Reported Lifestyle Measurements
//!
//! Nine fields: seven bounded numeric measurements plus two Yes/No answers.
//! The presentation layer constrains these through its widgets, but the
//! pipeline re-validates defensively since it cannot trust the caller.

use serde::{Deserialize, Serialize};

/// Inclusive numeric bounds per field, mirroring the intake form widgets.
/// Order matches the numeric prefix of `FEATURE_LAYOUT`.
pub const NUMERIC_RANGES: &[(&str, f32, f32)] = &[
    ("sleep", 0.0, 12.0),
    ("study", 0.0, 12.0),
    ("stress", 0.0, 10.0),
    ("screen_time", 0.0, 12.0),
    ("activity", 0.0, 120.0),
    ("appetite", 1.0, 5.0),
    ("social", 0.0, 10.0),
];

/// One prediction request as submitted by the user.
///
/// Categorical answers are kept as text; encoding to the integer codes the
/// model was trained on happens in [`crate::encoder::CategoricalEncoder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Sleep duration (hours/day)
    pub sleep: f32,
    /// Study hours (hours/day)
    pub study: f32,
    /// Stress level (0-10)
    pub stress: f32,
    /// Screen time (hours/day)
    pub screen_time: f32,
    /// Physical activity (minutes/day)
    pub activity: f32,
    /// Appetite level (1-5)
    pub appetite: f32,
    /// Social interaction level (0-10)
    pub social: f32,
    /// Feeling rested today? ("Yes"/"No")
    pub rested: String,
    /// Did you relax today? ("Yes"/"No")
    pub relaxed: String,
}

impl PredictionInput {
    /// Numeric measurements in layout order.
    pub fn numeric_values(&self) -> [f32; 7] {
        [
            self.sleep,
            self.study,
            self.stress,
            self.screen_time,
            self.activity,
            self.appetite,
            self.social,
        ]
    }

    /// Check every numeric field against its declared range.
    ///
    /// Runs before any model or log interaction; a failure here means the
    /// caller supplied an out-of-range value and nothing else happens.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        for (&(field, min, max), &value) in NUMERIC_RANGES.iter().zip(self.numeric_values().iter())
        {
            // NaN fails both comparisons and is rejected here too.
            if !(value >= min && value <= max) {
                return Err(InvalidInputError {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// A caller-supplied numeric value fell outside its declared range.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidInputError {
    pub field: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid value for '{}': {} (expected {} to {})",
            self.field, self.value, self.min, self.max
        )
    }
}

impl std::error::Error for InvalidInputError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> PredictionInput {
        PredictionInput {
            sleep: 7.0,
            study: 3.0,
            stress: 5.0,
            screen_time: 4.0,
            activity: 30.0,
            appetite: 3.0,
            social: 5.0,
            rested: "Yes".to_string(),
            relaxed: "No".to_string(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(sample_input().validate().is_ok());
    }

    #[test]
    fn test_boundary_values_pass() {
        let mut input = sample_input();
        input.sleep = 0.0;
        input.activity = 120.0;
        input.appetite = 1.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_high() {
        let mut input = sample_input();
        input.stress = 11.0;
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "stress");
        assert_eq!(err.max, 10.0);
    }

    #[test]
    fn test_out_of_range_low() {
        let mut input = sample_input();
        input.appetite = 0.0;
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "appetite");
        assert_eq!(err.min, 1.0);
    }

    #[test]
    fn test_nan_rejected() {
        let mut input = sample_input();
        input.sleep = f32::NAN;
        assert_eq!(input.validate().unwrap_err().field, "sleep");
    }

    #[test]
    fn test_ranges_cover_numeric_prefix() {
        use crate::features::layout::FEATURE_LAYOUT;
        for (i, &(field, _, _)) in NUMERIC_RANGES.iter().enumerate() {
            assert_eq!(FEATURE_LAYOUT[i], field);
        }
    }
}
