//! Log Record - one immutable row per prediction.
//!
//! Rows keep the nine inputs verbatim (textual categoricals, not their
//! encoded codes) plus the server-assigned timestamp and the derived label.
//! Column order is fixed for the lifetime of the store so files written by
//! different process runs parse as one sequence.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::features::input::PredictionInput;
use crate::risk::RiskLabel;

/// CSV header, written exactly once per store file.
pub const CSV_HEADER: &str =
    "datetime,sleep,study,stress,screen_time,activity,appetite,social,rested,relaxed,predicted_risk";

/// Columns per row: timestamp + nine inputs + predicted label.
pub const COLUMN_COUNT: usize = 11;

/// One prediction request and its outcome.
///
/// Identity is its position in the log; records are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Creation instant, assigned by this process at append time
    pub timestamp: DateTime<Utc>,
    pub sleep: f32,
    pub study: f32,
    pub stress: f32,
    pub screen_time: f32,
    pub activity: f32,
    pub appetite: f32,
    pub social: f32,
    /// Original textual answer, stored verbatim
    pub rested: String,
    /// Original textual answer, stored verbatim
    pub relaxed: String,
    pub predicted_risk: RiskLabel,
}

impl LogRecord {
    /// Combine a validated input with its derived label and a fresh timestamp.
    pub fn new(timestamp: DateTime<Utc>, input: &PredictionInput, label: RiskLabel) -> Self {
        Self {
            timestamp,
            sleep: input.sleep,
            study: input.study,
            stress: input.stress,
            screen_time: input.screen_time,
            activity: input.activity,
            appetite: input.appetite,
            social: input.social,
            rested: input.rested.clone(),
            relaxed: input.relaxed.clone(),
            predicted_risk: label,
        }
    }

    /// Serialize to one CSV row (no trailing newline).
    ///
    /// Fields are validated upstream: numerics are finite and the
    /// categoricals come from a fixed Yes/No enumeration, so no value can
    /// contain the delimiter and no quoting is needed.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.sleep,
            self.study,
            self.stress,
            self.screen_time,
            self.activity,
            self.appetite,
            self.social,
            self.rested,
            self.relaxed,
            self.predicted_risk.as_str()
        )
    }

    /// Parse one CSV row. Returns `None` for malformed rows so a damaged
    /// line cannot take down a tail read.
    pub fn from_csv_row(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != COLUMN_COUNT {
            return None;
        }

        Some(Self {
            timestamp: DateTime::parse_from_rfc3339(fields[0]).ok()?.with_timezone(&Utc),
            sleep: fields[1].parse().ok()?,
            study: fields[2].parse().ok()?,
            stress: fields[3].parse().ok()?,
            screen_time: fields[4].parse().ok()?,
            activity: fields[5].parse().ok()?,
            appetite: fields[6].parse().ok()?,
            social: fields[7].parse().ok()?,
            rested: fields[8].to_string(),
            relaxed: fields[9].to_string(),
            predicted_risk: RiskLabel::parse(fields[10])?,
        })
    }
}
