//! # Parity Steganography
//!
//! Hides bytes in the parity of RGB channel values and reads them back.
//!
//! ## Modules
//!
//! - [`bits`]: byte ⇄ bit conversion (MSB first)
//! - [`grid`]: the RGB pixel grid and its capacity
//! - [`encoder`]: writes bits and the end-of-data marker into a grid
//! - [`decoder`]: reads bits until the end-of-data marker
//! - [`steganography`]: image loading/saving around the codec
//! - [`error`]: [`StegoError`]

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod steganography;

// Re-export main types for convenience
pub use bits::{pack, unpack, Bit, BitPacker};
pub use decoder::{decode, Decoded};
pub use encoder::{encode, encode_in_place};
pub use error::StegoError;
pub use grid::{Capacity, Pixel, PixelGrid};
pub use steganography::{embed_bytes, extract_bytes, Extracted, PixelMode};
