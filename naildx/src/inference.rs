//! Inference over the pretrained classifier artifact.
//!
//! [`Classifier`] is the typed seam between the pipeline and the model
//! runtime: it takes a preprocessed single-image batch and returns one raw
//! score per class. [`OnnxClassifier`] backs it with an ONNX Runtime session
//! created once at startup and read-only for the life of the process.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use serde::Serialize;
use tracing::info;

use crate::error::{NailDxError, Result};
use crate::labels::{class_label, NUM_CLASSES};

/// Typed inference interface for a single-image classifier.
pub trait Classifier: Send + Sync {
    /// Raw class scores for a single-image batch.
    ///
    /// Scores are non-negative and in model output order; they are not
    /// required to sum to 1.
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// ONNX Runtime-backed classifier.
pub struct OnnxClassifier {
    // Session::run takes &mut self in ort 2.0; the session is never
    // reconfigured after load.
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Build a session from the artifact at `path`.
    ///
    /// A missing or corrupt artifact is a fatal startup error; callers are
    /// expected to abort initialization on failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| NailDxError::ModelLoad(path.to_path_buf(), e.to_string()))?;

        info!("Loaded classifier artifact from {:?}", path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let dims = {
            let s = input.shape();
            [s[0], s[1], s[2], s[3]]
        };
        let data = input
            .as_slice()
            .ok_or_else(|| NailDxError::Inference("input tensor is not contiguous".to_string()))?;
        let tensor = Tensor::from_array((dims, data.to_vec()))
            .map_err(|e| NailDxError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| NailDxError::Inference("classifier session mutex poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| NailDxError::Inference(e.to_string()))?;

        let (shape, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| NailDxError::Inference(e.to_string()))?;

        // One batch row of class scores, nothing else.
        if shape.len() != 2 || shape[0] != 1 {
            return Err(NailDxError::ModelContract(format!(
                "expected output shape [1, N], got {shape:?}"
            )));
        }

        Ok(scores.to_vec())
    }
}

/// Result of classifying one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Human-readable diagnosis name
    pub label: &'static str,
    /// Index of the winning class in model output order
    pub class_index: usize,
    /// Percentage in [0, 100], rounded to two decimal places
    pub confidence: f64,
    /// Name the upload was stored under
    pub filename: String,
}

impl Diagnosis {
    /// Pick the winning class from a raw score vector.
    ///
    /// The score vector must have exactly one entry per known class; anything
    /// else means the artifact was trained against a different label table
    /// and is reported as a contract violation.
    pub fn from_scores(scores: &[f32], filename: impl Into<String>) -> Result<Self> {
        if scores.len() != NUM_CLASSES {
            return Err(NailDxError::ModelContract(format!(
                "model produced {} scores for {} known classes",
                scores.len(),
                NUM_CLASSES
            )));
        }

        // First strict maximum wins; exact ties resolve to the lowest index.
        let (class_index, top) = scores
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, &s)| {
                if s > best.1 {
                    (i, s)
                } else {
                    best
                }
            });

        let label = class_label(class_index).ok_or_else(|| {
            NailDxError::ModelContract(format!("class index {class_index} has no label"))
        })?;

        let confidence = (f64::from(top) * 100.0 * 100.0).round() / 100.0;

        Ok(Self {
            label,
            class_index,
            confidence,
            filename: filename.into(),
        })
    }
}
