//! Upright Core Library
//!
//! Configuration and error types shared by the orientation pipeline and its callers.

pub mod config;
pub mod error;

pub use config::{DimensionPolicy, PreprocessorConfig};
pub use error::{ErrorCategory, PreprocessError};
