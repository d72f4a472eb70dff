//! The end-to-end diagnosis pipeline.
//!
//! One call runs the whole request-scoped sequence: validate the filename,
//! clear-and-save into the upload store, decode and preprocess the stored
//! image, run the classifier, and map the winning class to its label. A
//! failure at any stage discards the request's work; nothing is retried.

use tracing::{debug, info};

use crate::error::{NailDxError, Result};
use crate::inference::{Classifier, Diagnosis};
use crate::preprocess;
use crate::upload::{allowed_file, UploadStore};

/// Classify one uploaded image.
///
/// Synchronous and blocking for the full duration; the caller owns any
/// serialization of access to `store`.
pub fn diagnose(
    classifier: &dyn Classifier,
    store: &UploadStore,
    filename: &str,
    bytes: &[u8],
) -> Result<Diagnosis> {
    if filename.is_empty() {
        return Err(NailDxError::EmptyFilename);
    }
    if !allowed_file(filename) {
        return Err(NailDxError::InvalidFileType {
            filename: filename.to_string(),
        });
    }

    let saved = store.store(filename, bytes)?;
    let input = preprocess::load_input(&saved)?;

    debug!("Running inference for {:?}", saved);
    let scores = classifier.predict(&input)?;

    let stored_name = saved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let diagnosis = Diagnosis::from_scores(&scores, stored_name)?;

    info!(
        "Diagnosed {:?} as '{}' ({:.2}%)",
        diagnosis.filename, diagnosis.label, diagnosis.confidence
    );
    Ok(diagnosis)
}
