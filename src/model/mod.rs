//! Classifier Boundary
//!
//! The pre-trained model is an opaque artifact; this module owns only the
//! adaptation boundary around it (vector shaping in, class index out).
//! `RiskModel` is the seam that lets tests substitute a deterministic stub
//! for the ONNX-backed implementation.

pub mod onnx;

use crate::features::vector::EncodedFeatureVector;

/// Classifier seam: nine-feature vector in, discrete class index out.
///
/// Implementations are read-only after construction and safe to share across
/// concurrent requests.
pub trait RiskModel: Send + Sync {
    /// Classify one encoded feature vector.
    ///
    /// Assumed deterministic and side-effect-free. Failures are caller bugs
    /// or artifact faults, never transient; nothing here is retried.
    fn classify(&self, features: &EncodedFeatureVector) -> Result<i64, ClassificationError>;
}

/// Unexpected failure inside the classifier adaptation boundary.
#[derive(Debug)]
pub struct ClassificationError(pub String);

impl std::fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClassificationError: {}", self.0)
    }
}

impl std::error::Error for ClassificationError {}

/// Model artifact failed to load at startup.
///
/// Fatal: the pipeline cannot operate without the classifier, so process
/// initialization aborts rather than serving partial functionality.
#[derive(Debug)]
pub struct ModelUnavailableError(pub String);

impl std::fmt::Display for ModelUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelUnavailableError: {}", self.0)
    }
}

impl std::error::Error for ModelUnavailableError {}
