//! Mental Health Early Alert - Prediction Core
//!
//! Maps self-reported lifestyle measurements through a pre-trained classifier
//! into one of three risk tiers, and records every prediction to an
//! append-only CSV log.
//!
//! ## Architecture
//! - `features/` - Input schema, validation, versioned feature vectors
//! - `encoder` - Categorical text -> integer code tables
//! - `model/` - Classifier boundary (ONNX runtime + stubbable trait)
//! - `risk` - Class index -> human-readable risk tier
//! - `store/` - Durable append-only prediction log
//! - `pipeline` - Orchestrator: validate, encode, classify, label, log
//!
//! The interactive form and any download/display affordances live in an
//! external presentation layer that calls [`PredictionPipeline::predict`]
//! and renders the returned [`PredictionReport`].

pub mod encoder;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod store;

pub use encoder::{CategoricalEncoder, EncoderLoadError, UnknownCategoryError};
pub use features::input::{InvalidInputError, PredictionInput};
pub use features::vector::EncodedFeatureVector;
pub use model::onnx::OnnxRiskModel;
pub use model::{ClassificationError, ModelUnavailableError, RiskModel};
pub use pipeline::{
    LoggingDegradedError, PipelineConfig, PredictError, PredictionPipeline, PredictionReport,
    StartupError,
};
pub use risk::RiskLabel;
pub use store::{LogRecord, PredictionLog, StoreUnavailableError};
