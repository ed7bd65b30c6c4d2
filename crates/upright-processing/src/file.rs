//! Uploaded file handed to preprocessors

/// An uploaded file: caller-facing name, declared MIME type and raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
