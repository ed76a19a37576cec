//! # Steganography Errors
//!
//! Failure modes of the parity codec and of the image source/sink around it.

use thiserror::Error;

/// Errors raised while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The payload needs more channel positions than the grid offers.
    ///
    /// Both counts are in bytes. Raised before the grid is touched.
    #[error("payload is too big for this image: need {required} bytes, image holds {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// The channel stream ended without an end-of-data sentinel.
    ///
    /// The bits read so far are still handed back by the decoder, but they
    /// should not be trusted.
    #[error("no end-of-data marker found after reading {bits_read} bits")]
    MalformedEncoding { bits_read: usize },

    /// The pixel data does not provide three readable 8-bit channels per pixel.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
