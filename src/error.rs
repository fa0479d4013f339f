// src/error.rs
use thiserror::Error;

/// Failures loading or decoding the logo asset.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{path}': {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid image format in '{path}': {message}")]
    InvalidFormat { path: String, message: String },
}

/// Failures inside the document builder or the PDF serializer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Content overflows the page: cursor at {cursor:.1} needs {needed:.1} units")]
    PageOverflow { cursor: f32, needed: f32 },

    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// The single error surfaced by a render call.
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Logo asset unavailable: {0}")]
    Asset(#[from] AssetError),

    #[error("Failed to write receipt: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}
