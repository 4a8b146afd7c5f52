//! Error types for palette extraction

use thiserror::Error;

/// Result type alias for palette extraction
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// The caller handed over a zero-length buffer
    #[error("Empty input: no image bytes provided")]
    EmptyInput,

    /// Bytes are not a supported image, or the image is corrupt
    #[error("Unable to decode image: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// Fewer distinct colors than requested clusters
    #[error("Cannot form {requested} clusters from {distinct} distinct colors")]
    Clustering { requested: usize, distinct: usize },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl PaletteError {
    pub fn decode(message: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// True when the failure is caused by what the caller sent (bad bytes,
    /// bad options) rather than by the extraction itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaletteError::EmptyInput
                | PaletteError::Decode { .. }
                | PaletteError::InvalidParameter { .. }
        )
    }
}
