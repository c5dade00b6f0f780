//! Feature schema and input handling.
//!
//! - `layout` - Authoritative feature order, version, layout hash
//! - `input` - Self-reported measurements + range validation
//! - `vector` - Versioned numeric vector fed to the classifier

pub mod input;
pub mod layout;
pub mod vector;

pub use input::{InvalidInputError, PredictionInput};
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::EncodedFeatureVector;
