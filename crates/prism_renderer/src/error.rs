use prism_core::{BufferError, SceneError};
use thiserror::Error;

/// Errors that abort a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Buffers out of date: {0}")]
    StaleBuffers(String),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Nothing to save: no frame has been presented")]
    NoFrame,
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
