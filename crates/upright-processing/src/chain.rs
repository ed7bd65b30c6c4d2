//! Ordered chain of file preprocessors

use upright_core::PreprocessorConfig;

use crate::file::MediaFile;
use crate::image::ImagePreprocessor;
use crate::traits::FilePreprocessor;

/// Applies each registered preprocessor to a file, in registration order.
#[derive(Default)]
pub struct PreprocessorChain {
    preprocessors: Vec<Box<dyn FilePreprocessor>>,
}

impl PreprocessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain with the image orientation preprocessor registered.
    pub fn with_defaults(config: &PreprocessorConfig) -> Self {
        let mut chain = Self::new();
        chain.register(Box::new(ImagePreprocessor::new(config)));
        chain
    }

    pub fn register(&mut self, preprocessor: Box<dyn FilePreprocessor>) {
        self.preprocessors.push(preprocessor);
    }

    pub fn len(&self) -> usize {
        self.preprocessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preprocessors.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.preprocessors.iter().map(|p| p.name()).collect()
    }

    pub fn apply(&self, file: &mut MediaFile) {
        for preprocessor in &self.preprocessors {
            tracing::debug!(
                preprocessor = preprocessor.name(),
                file = %file.name,
                "Applying preprocessor"
            );
            preprocessor.accept(file);
        }
    }
}
