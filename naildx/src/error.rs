//! Error Handling Module
//!
//! Defines the error type shared by the diagnosis pipeline.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for nail diagnosis operations.
///
/// Variants split into two families: client input errors (the user can fix
/// them by resubmitting) and processing errors (decode, model, I/O). The HTTP
/// layer maps the former to 400 and the latter to 500 via
/// [`NailDxError::is_client_error`].
#[derive(Error, Debug)]
pub enum NailDxError {
    /// The upload carried no filename
    #[error("No selected file")]
    EmptyFilename,

    /// The filename's extension is not on the allow-list
    #[error("Invalid file type. Only PNG, JPG, JPEG allowed.")]
    InvalidFileType { filename: String },

    /// The stored file could not be decoded as an image
    #[error("Failed to decode image at '{0}': {1}")]
    ImageDecode(PathBuf, String),

    /// The model artifact is missing or unloadable
    #[error("Failed to load model at '{0}': {1}")]
    ModelLoad(PathBuf, String),

    /// The model session failed while running
    #[error("Inference error: {0}")]
    Inference(String),

    /// The model produced output that violates the expected contract
    #[error("Model output contract violated: {0}")]
    ModelContract(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NailDxError {
    /// True for errors the client caused and can fix by resubmitting.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NailDxError::EmptyFilename | NailDxError::InvalidFileType { .. }
        )
    }
}

/// Convenience result type for nail diagnosis operations
pub type Result<T> = std::result::Result<T, NailDxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_split() {
        assert!(NailDxError::EmptyFilename.is_client_error());
        assert!(NailDxError::InvalidFileType {
            filename: "scan.txt".to_string()
        }
        .is_client_error());
        assert!(!NailDxError::Inference("boom".to_string()).is_client_error());
        assert!(!NailDxError::ModelContract("shape".to_string()).is_client_error());
    }

    #[test]
    fn test_invalid_file_type_message() {
        let err = NailDxError::InvalidFileType {
            filename: "scan.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid file type. Only PNG, JPG, JPEG allowed."
        );
    }
}
