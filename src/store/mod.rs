//! Prediction Log Store
//!
//! Durable, append-only record of every successful prediction. One CSV row
//! per request; the file is the export artifact handed to the presentation
//! layer for download.

pub mod log;
pub mod record;

#[cfg(test)]
mod tests;

pub use log::PredictionLog;
pub use record::LogRecord;

/// The persisted store could not be read.
///
/// Distinct from an append failure: a completed append is still reported as
/// successful even when the subsequent read fails.
#[derive(Debug, Clone)]
pub struct StoreUnavailableError(pub String);

impl std::fmt::Display for StoreUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoreUnavailableError: {}", self.0)
    }
}

impl std::error::Error for StoreUnavailableError {}
