//! Core traits for file preprocessing

use crate::file::MediaFile;

/// A preprocessing step applied to uploaded files before they are stored.
///
/// `accept` is total: implementations replace `file.data` with their output or leave it
/// untouched, and never fail.
pub trait FilePreprocessor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn accept(&self, file: &mut MediaFile);
}
