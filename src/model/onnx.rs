//! ONNX Runtime adapter for the pre-trained risk classifier.
//!
//! The artifact is an ONNX export of the trained model. Converter output
//! varies: some emit the predicted label as an int64 tensor, others emit
//! per-class scores as float32. Both are accepted here; scores are reduced
//! by argmax.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{ClassificationError, ModelUnavailableError, RiskModel};
use crate::features::layout::FEATURE_COUNT;
use crate::features::vector::EncodedFeatureVector;

/// Model metadata captured at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub features: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Inference stats for status reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model_path: String,
    pub inference_count: u64,
    pub avg_latency_us: u64,
}

/// ONNX-backed [`RiskModel`].
///
/// The session is loaded once at startup and never swapped; the mutex exists
/// only because ONNX Runtime requires exclusive access per run call.
#[derive(Debug)]
pub struct OnnxRiskModel {
    session: Mutex<Session>,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxRiskModel {
    /// Load the classifier artifact from a file.
    ///
    /// Fails with [`ModelUnavailableError`] if the file is missing or not a
    /// loadable model; callers treat that as fatal at startup.
    pub fn load(model_path: &Path) -> Result<Self, ModelUnavailableError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ModelUnavailableError(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| ModelUnavailableError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelUnavailableError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelUnavailableError(format!("Failed to load model: {}", e)))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: model_path.display().to_string(),
                features: FEATURE_COUNT,
                loaded_at: chrono::Utc::now(),
            },
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn status(&self) -> ModelStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        ModelStatus {
            model_path: self.metadata.model_path.clone(),
            inference_count: count,
            avg_latency_us: if count > 0 { sum / count } else { 0 },
        }
    }

}

impl RiskModel for OnnxRiskModel {
    fn classify(&self, features: &EncodedFeatureVector) -> Result<i64, ClassificationError> {
        features
            .validate()
            .map_err(|e| ClassificationError(e.to_string()))?;

        let start_time = std::time::Instant::now();

        let input_array =
            Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.as_slice().to_vec())
                .map_err(|e| ClassificationError(format!("Array error: {}", e)))?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassificationError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| ClassificationError("No output defined".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassificationError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| ClassificationError("No output".to_string()))?;

        // Label output (int64) takes precedence; otherwise argmax over scores.
        let class = if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            *data
                .first()
                .ok_or_else(|| ClassificationError("Empty label output".to_string()))?
        } else {
            let (_, scores) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassificationError(format!("Extract error: {}", e)))?;
            if scores.is_empty() {
                return Err(ClassificationError("Empty score output".to_string()));
            }
            scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i as i64)
                .unwrap_or(0)
        };

        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        log::debug!("Classified in {}us -> class {}", elapsed, class);

        Ok(class)
    }
}
