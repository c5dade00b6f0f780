//! Risk Tiers
//!
//! Pure lookup from the classifier's class index to a stable human-readable
//! tier. The table is fixed and never reordered; any index outside {0,1,2}
//! maps to the Unknown sentinel instead of failing.

use serde::{Deserialize, Serialize};

/// Risk tiers shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
    /// Classifier returned an index outside the trained set.
    Unknown,
}

impl RiskLabel {
    /// Map a classifier class index to its tier.
    ///
    /// Total over all of `i64`; an out-of-table index yields the sentinel
    /// rather than an error, but it still indicates a classifier contract
    /// violation, so the caller logs it.
    pub fn from_class(class: i64) -> Self {
        match class {
            0 => RiskLabel::Low,
            1 => RiskLabel::Moderate,
            2 => RiskLabel::High,
            _ => RiskLabel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::Moderate => "Moderate Risk",
            RiskLabel::High => "High Risk",
            RiskLabel::Unknown => "Unknown Risk Level",
        }
    }

    /// Parse the display form back, e.g. when reading stored log rows.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Low Risk" => Some(RiskLabel::Low),
            "Moderate Risk" => Some(RiskLabel::Moderate),
            "High Risk" => Some(RiskLabel::High),
            "Unknown Risk Level" => Some(RiskLabel::Unknown),
            _ => None,
        }
    }

    /// Ordinal severity for the three known tiers (Unknown sorts last).
    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLabel::Low => 0,
            RiskLabel::Moderate => 1,
            RiskLabel::High => 2,
            RiskLabel::Unknown => 3,
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classes() {
        assert_eq!(RiskLabel::from_class(0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_class(1), RiskLabel::Moderate);
        assert_eq!(RiskLabel::from_class(2), RiskLabel::High);
    }

    #[test]
    fn test_out_of_table_class_is_sentinel() {
        assert_eq!(RiskLabel::from_class(3), RiskLabel::Unknown);
        assert_eq!(RiskLabel::from_class(-1), RiskLabel::Unknown);
        assert_eq!(RiskLabel::from_class(i64::MAX), RiskLabel::Unknown);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(RiskLabel::Moderate.as_str(), "Moderate Risk");
        assert_eq!(RiskLabel::Unknown.as_str(), "Unknown Risk Level");
    }

    #[test]
    fn test_parse_round_trip() {
        for label in [
            RiskLabel::Low,
            RiskLabel::Moderate,
            RiskLabel::High,
            RiskLabel::Unknown,
        ] {
            assert_eq!(RiskLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(RiskLabel::parse("Medium Risk"), None);
    }
}
