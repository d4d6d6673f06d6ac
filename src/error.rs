//! Errors raised while loading scenes and writing images. Ray casting itself cannot fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Render settings that cannot produce an image.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("unknown material preset '{0}'")]
    UnknownMaterial(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
