//! # Parity Decoder
//!
//! Reads bits back out of a channel stream until the end-of-data marker.

use log::{debug, warn};

use super::bits::Bit;
use super::encoder::SENTINEL;
use super::error::StegoError;
use super::grid::PixelGrid;

/// Result of reading a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Every bit read before the marker, or before the stream ran out.
    pub bits: Vec<Bit>,
    /// Channel position of the marker, `None` if none was found.
    pub sentinel: Option<usize>,
}

impl Decoded {
    /// Whether decoding stopped on the end-of-data marker.
    pub fn is_complete(&self) -> bool {
        self.sentinel.is_some()
    }

    /// Surfaces a missing marker as [`StegoError::MalformedEncoding`].
    pub fn check(&self) -> Result<(), StegoError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(StegoError::MalformedEncoding {
                bits_read: self.bits.len(),
            })
        }
    }

    /// The bits, but only if the marker was found.
    pub fn into_bits(self) -> Result<Vec<Bit>, StegoError> {
        self.check()?;
        Ok(self.bits)
    }
}

/// Reads the bits hidden in `grid`.
///
/// Never fails: a grid without an end-of-data marker yields every channel of
/// the stream as a bit and is flagged incomplete, see [`Decoded::check`].
pub fn decode(grid: &PixelGrid) -> Decoded {
    let channels = grid.channels();
    let sentinel = channels.iter().position(|&value| value == SENTINEL);
    let data = &channels[..sentinel.unwrap_or(channels.len())];

    let bits: Vec<Bit> = data.iter().map(|&value| Bit::from_parity(value)).collect();

    match sentinel {
        Some(position) => debug!("End marker found at channel {}", position),
        None => warn!(
            "No end marker in {} channels, decoded data is unreliable",
            channels.len()
        ),
    }

    Decoded { bits, sentinel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bits::{pack, unpack, Bit::One, Bit::Zero};
    use crate::processing::encoder::encode;
    use crate::processing::grid::Pixel;

    #[test]
    fn test_reads_until_sentinel() {
        let grid = PixelGrid::from_raw(1, 2, vec![2, 3, 254, 0, 1, 4]).unwrap();
        let decoded = decode(&grid);

        assert_eq!(decoded.bits, vec![One, Zero, One]);
        assert_eq!(decoded.sentinel, Some(3));
        assert!(decoded.check().is_ok());
    }

    #[test]
    fn test_immediate_sentinel_is_empty_payload() {
        let grid = PixelGrid::filled(2, 2, Pixel::new(0, 5, 5));
        let decoded = decode(&grid);
        assert!(decoded.bits.is_empty());
        assert!(decoded.is_complete());
    }

    #[test]
    fn test_missing_sentinel_is_malformed() {
        let grid = PixelGrid::filled(4, 4, Pixel::new(1, 3, 255));
        let decoded = decode(&grid);

        assert_eq!(decoded.bits.len(), 48);
        assert!(decoded.bits.iter().all(|&bit| bit == Zero));
        assert!(!decoded.is_complete());
        assert!(matches!(
            decoded.check(),
            Err(StegoError::MalformedEncoding { bits_read: 48 })
        ));
        assert!(decoded.into_bits().is_err());
    }

    #[test]
    fn test_two_byte_scenario() {
        let grid = PixelGrid::filled(4, 4, Pixel::new(90, 180, 33));
        let bits = pack(b"\x00\xFF");

        let encoded = encode(&grid, &bits).unwrap();
        let decoded = decode(&encoded).into_bits().unwrap();

        assert_eq!(decoded, bits);
        assert_eq!(unpack(&decoded), b"\x00\xFF".to_vec());
    }
}
