//! Crate-wide error type.
//!
//! Decode failures and malformed upstream data are fatal for the call that hit
//! them. Degenerate numeric cases (flat signal maps, zero-union boxes) never
//! surface here; they are resolved locally by the algorithms.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {} has zero width or height", path.display())]
    EmptyImage { path: PathBuf },

    #[error("Failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed proposal #{index}: {reason}")]
    MalformedProposal { index: usize, reason: String },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl InspectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

impl From<InspectError> for String {
    fn from(err: InspectError) -> Self {
        err.to_string()
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
