//! Prediction Pipeline - the orchestrator.
//!
//! validate -> encode -> classify -> label -> append -> tail read.
//!
//! Each `predict` call is a single request/response with no cross-call state
//! other than the append-only log. Dependencies are constructed explicitly
//! (load once, fail fast) and injected, so tests run against a deterministic
//! stub model instead of the ONNX artifact.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::encoder::{CategoricalEncoder, EncoderLoadError, UnknownCategoryError};
use crate::features::input::{InvalidInputError, PredictionInput};
use crate::model::onnx::OnnxRiskModel;
use crate::model::{ClassificationError, ModelUnavailableError, RiskModel};
use crate::risk::RiskLabel;
use crate::store::{LogRecord, PredictionLog};

/// Records returned for display with every prediction. Fixed by design, not
/// user-configurable.
pub const RECENT_RECORDS: usize = 10;

/// Locations of the startup artifacts and the log store.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pre-trained classifier artifact (ONNX)
    pub model_path: PathBuf,
    /// Categorical encoding tables (JSON)
    pub encoders_path: PathBuf,
    /// Append-only prediction log (CSV)
    pub log_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mental-alert");
        Self {
            model_path: base.join("risk_predictor.onnx"),
            encoders_path: base.join("label_encoders.json"),
            log_path: base.join("user_predictions_log.csv"),
        }
    }
}

/// Everything the presentation layer needs from one prediction:
/// the tier to display, the export locator for the download affordance, and
/// the recent records for tabular display.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub predicted_risk: RiskLabel,
    pub export_path: PathBuf,
    /// Up to [`RECENT_RECORDS`] most recent records, oldest first.
    pub recent: Vec<LogRecord>,
    /// Set when classification succeeded but the audit log did not keep up.
    /// The label above is still valid; the caller decides whether to warn.
    pub degraded: Option<LoggingDegradedError>,
}

/// Orchestrates encoder, classifier, label mapping, and the log store.
#[derive(Debug)]
pub struct PredictionPipeline<M: RiskModel> {
    model: Arc<M>,
    encoder: CategoricalEncoder,
    log: PredictionLog,
}

impl PredictionPipeline<OnnxRiskModel> {
    /// Load every startup dependency and construct the pipeline.
    ///
    /// Either fully succeeds or fails; a missing or corrupt model/encoder
    /// artifact means no requests are served at all.
    pub fn initialize(config: &PipelineConfig) -> Result<Self, StartupError> {
        let model = OnnxRiskModel::load(&config.model_path)?;
        let encoder = CategoricalEncoder::load(&config.encoders_path)?;
        let log = PredictionLog::open(config.log_path.clone())?;
        log::info!("Prediction pipeline initialized");
        Ok(Self::new(Arc::new(model), encoder, log))
    }
}

impl<M: RiskModel> PredictionPipeline<M> {
    pub fn new(model: Arc<M>, encoder: CategoricalEncoder, log: PredictionLog) -> Self {
        Self {
            model,
            encoder,
            log,
        }
    }

    /// Run one prediction request end to end.
    ///
    /// Validation failures reject the request before the model or the log is
    /// touched. A log failure after a successful classification does not fail
    /// the request; it is reported through [`PredictionReport::degraded`].
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionReport, PredictError> {
        input.validate()?;
        let features = self.encoder.encode_input(input)?;

        let class = self.model.classify(&features)?;
        let label = RiskLabel::from_class(class);
        if label == RiskLabel::Unknown {
            // Sentinel by design, but an out-of-table index is still a
            // classifier contract violation worth surfacing in the logs.
            log::warn!("Classifier returned out-of-table class {}", class);
        }

        let record = LogRecord::new(Utc::now(), input, label);
        let mut degraded = match self.log.append(&record) {
            Ok(()) => None,
            Err(e) => {
                log::error!("Failed to append prediction record: {}", e);
                Some(LoggingDegradedError(format!("append failed: {}", e)))
            }
        };

        let recent = match self.log.read_last(RECENT_RECORDS) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to read recent records: {}", e);
                degraded.get_or_insert(LoggingDegradedError(format!("read failed: {}", e)));
                Vec::new()
            }
        };

        log::debug!(
            "Prediction complete: {} ({} records in store)",
            label,
            self.log.len()
        );

        Ok(PredictionReport {
            predicted_risk: label,
            export_path: self.log.export_path().to_path_buf(),
            recent,
            degraded,
        })
    }

    /// The underlying log store (export path, record count).
    pub fn log(&self) -> &PredictionLog {
        &self.log
    }
}

/// Log append or tail read failed while the prediction itself succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct LoggingDegradedError(pub String);

impl std::fmt::Display for LoggingDegradedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LoggingDegradedError: {}", self.0)
    }
}

impl std::error::Error for LoggingDegradedError {}

/// A prediction request failed; no record is appended and no partial label
/// is ever returned.
#[derive(Debug)]
pub enum PredictError {
    /// Numeric field outside its declared range
    InvalidInput(InvalidInputError),
    /// Categorical answer outside its trained enumeration
    UnknownCategory(UnknownCategoryError),
    /// Failure inside the classifier boundary
    Classification(ClassificationError),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::InvalidInput(e) => write!(f, "{}", e),
            PredictError::UnknownCategory(e) => write!(f, "{}", e),
            PredictError::Classification(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictError::InvalidInput(e) => Some(e),
            PredictError::UnknownCategory(e) => Some(e),
            PredictError::Classification(e) => Some(e),
        }
    }
}

impl From<InvalidInputError> for PredictError {
    fn from(e: InvalidInputError) -> Self {
        PredictError::InvalidInput(e)
    }
}

impl From<UnknownCategoryError> for PredictError {
    fn from(e: UnknownCategoryError) -> Self {
        PredictError::UnknownCategory(e)
    }
}

impl From<ClassificationError> for PredictError {
    fn from(e: ClassificationError) -> Self {
        PredictError::Classification(e)
    }
}

/// A startup dependency could not be loaded; initialization aborts.
#[derive(Debug)]
pub enum StartupError {
    Model(ModelUnavailableError),
    Encoders(EncoderLoadError),
    Store(std::io::Error),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Model(e) => write!(f, "{}", e),
            StartupError::Encoders(e) => write!(f, "{}", e),
            StartupError::Store(e) => write!(f, "Cannot open prediction log: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Model(e) => Some(e),
            StartupError::Encoders(e) => Some(e),
            StartupError::Store(e) => Some(e),
        }
    }
}

impl From<ModelUnavailableError> for StartupError {
    fn from(e: ModelUnavailableError) -> Self {
        StartupError::Model(e)
    }
}

impl From<EncoderLoadError> for StartupError {
    fn from(e: EncoderLoadError) -> Self {
        StartupError::Encoders(e)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(e: std::io::Error) -> Self {
        StartupError::Store(e)
    }
}
