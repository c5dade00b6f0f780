//! Categorical Encoder - text answers to the integer codes the model knows.
//!
//! The per-field tables are trained alongside the classifier and shipped as a
//! JSON artifact (`{field: {text: code}}`). They are loaded once at startup
//! and treated as read-only for the rest of the process lifetime. An unmapped
//! value must fail loudly: silently coercing it would corrupt the feature
//! vector fed to the classifier.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::input::PredictionInput;
use crate::features::layout::FEATURE_COUNT;
use crate::features::vector::EncodedFeatureVector;

/// Fixed per-field lookup tables for categorical answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    tables: BTreeMap<String, BTreeMap<String, i64>>,
}

impl CategoricalEncoder {
    /// Load encoder tables from a JSON artifact.
    ///
    /// Absence or corruption of the artifact is a startup failure; the
    /// pipeline must not accept requests without it.
    pub fn load(path: &Path) -> Result<Self, EncoderLoadError> {
        let file = File::open(path)
            .map_err(|e| EncoderLoadError(format!("cannot open {}: {}", path.display(), e)))?;
        let tables: BTreeMap<String, BTreeMap<String, i64>> =
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| EncoderLoadError(format!("cannot parse {}: {}", path.display(), e)))?;

        let encoder = Self { tables };
        for field in ["rested", "relaxed"] {
            if !encoder.tables.contains_key(field) {
                return Err(EncoderLoadError(format!(
                    "encoder artifact is missing table for '{}'",
                    field
                )));
            }
        }

        log::info!(
            "Loaded categorical encoder tables for: {:?}",
            encoder.tables.keys().collect::<Vec<_>>()
        );
        Ok(encoder)
    }

    /// Build an encoder from in-memory tables (tests, embedded defaults).
    pub fn from_tables(tables: BTreeMap<String, BTreeMap<String, i64>>) -> Self {
        Self { tables }
    }

    /// Encode one categorical answer to its trained integer code.
    pub fn encode(&self, field: &str, value: &str) -> Result<i64, UnknownCategoryError> {
        let table = self
            .tables
            .get(field)
            .ok_or_else(|| UnknownCategoryError {
                field: field.to_string(),
                value: value.to_string(),
                known: Vec::new(),
            })?;

        table
            .get(value)
            .copied()
            .ok_or_else(|| UnknownCategoryError {
                field: field.to_string(),
                value: value.to_string(),
                known: table.keys().cloned().collect(),
            })
    }

    /// Encode a full input into the vector the classifier consumes.
    ///
    /// Numeric measurements pass through in layout order; the two categorical
    /// answers land at the trailing positions as their integer codes.
    pub fn encode_input(
        &self,
        input: &PredictionInput,
    ) -> Result<EncodedFeatureVector, UnknownCategoryError> {
        let rested = self.encode("rested", &input.rested)?;
        let relaxed = self.encode("relaxed", &input.relaxed)?;

        let mut values = [0.0f32; FEATURE_COUNT];
        values[..7].copy_from_slice(&input.numeric_values());
        values[7] = rested as f32;
        values[8] = relaxed as f32;

        Ok(EncodedFeatureVector::from_values(values))
    }
}

/// A categorical value not present in the field's trained enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCategoryError {
    pub field: String,
    pub value: String,
    /// Values the field's table does know, for the error message.
    pub known: Vec<String>,
}

impl std::fmt::Display for UnknownCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.known.is_empty() {
            write!(f, "No encoding table for field '{}'", self.field)
        } else {
            write!(
                f,
                "Unknown value '{}' for '{}' (known: {})",
                self.value,
                self.field,
                self.known.join(", ")
            )
        }
    }
}

impl std::error::Error for UnknownCategoryError {}

/// Encoder artifact missing or unparsable at startup.
#[derive(Debug)]
pub struct EncoderLoadError(pub String);

impl std::fmt::Display for EncoderLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncoderLoadError: {}", self.0)
    }
}

impl std::error::Error for EncoderLoadError {}
