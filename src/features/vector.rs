//! Encoded Feature Vector - the numeric input fed to the classifier.
//!
//! Created fresh per request, consumed once by the model, never persisted.
//! Carries the layout version and hash so a stale vector can never be fed to
//! a model expecting a different schema.

use serde::{Deserialize, Serialize};

use super::layout::{layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_VERSION};

/// Ordered numeric encoding of one [`crate::PredictionInput`].
///
/// Values follow `FEATURE_LAYOUT`: the seven numeric measurements first, then
/// the two categorical fields replaced by their integer codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    /// Feature layout version this vector was built against
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in `FEATURE_LAYOUT` order
    pub values: [f32; FEATURE_COUNT],
}

impl EncodedFeatureVector {
    /// Create from raw values with the current layout version.
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as an array reference.
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Validate that this vector is compatible with the current layout.
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }
}
