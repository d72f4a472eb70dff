//! # Nail Diagnosis
//!
//! A Rust library for classifying nail-condition photographs with a pretrained
//! convolutional network loaded from an ONNX artifact. The model is an opaque,
//! externally trained file; this crate provides everything around it:
//! upload validation, storage housekeeping, preprocessing, inference dispatch,
//! and the end-to-end diagnosis pipeline.
//!
//! ## Modules
//!
//! - `labels`: fixed class-label table mapping output indices to diagnosis names
//! - `upload`: filename validation, sanitization, and the single-slot upload store
//! - `preprocess`: image decoding, resizing, and VGG-style normalization
//! - `inference`: the typed `Classifier` interface and its ONNX Runtime backend
//! - `pipeline`: the validate → store → preprocess → predict sequence
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use naildx::{diagnose, OnnxClassifier, UploadStore};
//!
//! let classifier = OnnxClassifier::load("models/nail_diagnosis_vgg16.onnx")?;
//! let store = UploadStore::new("static/uploads")?;
//! let diagnosis = diagnose(&classifier, &store, "nail.png", &bytes)?;
//! println!("{} ({:.2}%)", diagnosis.label, diagnosis.confidence);
//! ```

pub mod error;
pub mod inference;
pub mod labels;
pub mod pipeline;
pub mod preprocess;
pub mod upload;

// Re-export commonly used items for convenience
pub use error::{NailDxError, Result};
pub use inference::{Classifier, Diagnosis, OnnxClassifier};
pub use labels::{class_label, CLASS_LABELS, NUM_CLASSES};
pub use pipeline::diagnose;
pub use upload::{allowed_file, sanitize_filename, UploadStore};
