//! Error types shared by the simulation, scenario and rendering layers

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A unit vector was requested from a zero-length vector
    #[error("undefined direction: {0}")]
    DegenerateDirection(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SimError>;
