//! # parity-steg
//!
//! Hides a byte payload in the channel parities of a lossless RGB image and
//! recovers it later.
//!
//! Every channel value before the end-of-data marker carries one bit: even
//! means one, odd means zero. The marker is a single channel set to 0.
//!
//! - [`processing`]: the codec and the image glue around it
//! - [`common`]: configuration and run reports for the command-line tool

pub mod common;
pub mod processing;

pub use processing::{decode, encode, pack, unpack, Bit, PixelGrid, StegoError};
