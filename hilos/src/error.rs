use std::collections::TryReserveError;

use thiserror::Error;

/// Every failure is fatal to the invocation; no artifact is written on any
/// error path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode the input image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("unsupported channel layout: {0}")]
    UnsupportedFormat(#[source] image::ImageError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("failed to allocate the output canvas: {0}")]
    Resource(#[from] TryReserveError),
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the pin count must exceed twice the minimum pin distance ({pins} <= 2 * {min_distance})")]
    PinDistance { pins: usize, min_distance: usize },
    #[error("the recent pin window excludes every eligible pin")]
    WindowExhausted,
}

impl Error {
    /// Splits the `image` crate's error classes onto the decode/format/io
    /// axes used by callers.
    pub(crate) fn from_image(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(_) => Self::UnsupportedFormat(err),
            image::ImageError::IoError(io) => Self::Io(io),
            _ => Self::Decode(err),
        }
    }
}
