//! Error types module
//!
//! Every failure the orientation pipeline can hit is a [`PreprocessError`]. None of them
//! reach the caller of the preprocessor: the orchestrator logs them with their
//! [`ErrorCategory`] and falls back to the original bytes.

use std::io;

/// Coarse failure category, recorded as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Io,
    Metadata,
    Decode,
    Processing,
}

impl ErrorCategory {
    /// Machine-readable code (e.g., "DECODE_ERROR")
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::Io => "IO_ERROR",
            ErrorCategory::Metadata => "METADATA_ERROR",
            ErrorCategory::Decode => "DECODE_ERROR",
            ErrorCategory::Processing => "PROCESSING_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Image processing error: {0}")]
    Processing(String),
}

impl PreprocessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PreprocessError::Io(_) => ErrorCategory::Io,
            PreprocessError::Metadata(_) => ErrorCategory::Metadata,
            PreprocessError::Decode(_) => ErrorCategory::Decode,
            PreprocessError::Processing(_) => ErrorCategory::Processing,
        }
    }

    /// Human-readable context used in the fallback log line.
    pub fn context_message(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "IO error occurred during read of image",
            ErrorCategory::Metadata => "Metadata error occurred during reading image",
            ErrorCategory::Decode => "Could not decode image",
            ErrorCategory::Processing => "Error during image processing",
        }
    }
}
