//! # Bit Packing
//!
//! Conversion between byte payloads and the bit sequences the parity codec
//! works on. Bytes are always expanded most-significant bit first.

use std::iter::FusedIterator;

/// A single payload bit.
///
/// In a channel value, [`Bit::One`] is carried by an even value and
/// [`Bit::Zero`] by an odd one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Reads the bit carried by a (non-sentinel) channel value.
    pub fn from_parity(value: u8) -> Self {
        if value % 2 == 0 {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// Whether `value` already has the parity that carries this bit.
    pub fn matches(self, value: u8) -> bool {
        Bit::from_parity(value) == self
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

/// Lazily expands a byte slice into its bits, MSB first.
#[derive(Debug, Clone)]
pub struct BitPacker<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> BitPacker<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, index: 0 }
    }
}

impl Iterator for BitPacker<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.index / 8)?;
        let shift = 7 - (self.index % 8);
        self.index += 1;

        Some(Bit::from((byte >> shift) & 1 == 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() * 8 - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitPacker<'_> {}
impl FusedIterator for BitPacker<'_> {}

/// Expands `bytes` into `8 * bytes.len()` bits.
pub fn pack(bytes: &[u8]) -> Vec<Bit> {
    BitPacker::new(bytes).collect()
}

/// Folds bits back into bytes, eight at a time, MSB first.
///
/// A trailing group shorter than eight bits is dropped, so the result always
/// has `bits.len() / 8` bytes.
pub fn unpack(bits: &[Bit]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_pack_msb_first() {
        assert_eq!(
            pack(&[0b1000_0001, 0x0F]),
            vec![
                One, Zero, Zero, Zero, Zero, Zero, Zero, One, //
                Zero, Zero, Zero, Zero, One, One, One, One,
            ]
        );
    }

    #[test]
    fn test_packer_len() {
        let packer = BitPacker::new(b"abc");
        assert_eq!(packer.len(), 24);
        assert_eq!(BitPacker::new(&[]).count(), 0);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let payload: Vec<u8> = (0..=255).collect();
        assert_eq!(unpack(&pack(&payload)), payload);
    }

    #[test]
    fn test_unpack_truncates_partial_group() {
        let mut bits = pack(&[0xA5, 0x3C]);
        bits.extend([One, One, Zero]);

        let bytes = unpack(&bits);
        assert_eq!(bytes, vec![0xA5, 0x3C]);
        assert_eq!(bytes.len(), bits.len() / 8);

        assert!(unpack(&[One; 7]).is_empty());
    }

    #[test]
    fn test_parity_mapping() {
        assert_eq!(Bit::from_parity(0), One);
        assert_eq!(Bit::from_parity(254), One);
        assert_eq!(Bit::from_parity(1), Zero);
        assert_eq!(Bit::from_parity(255), Zero);
        assert!(One.matches(128));
        assert!(!Zero.matches(128));
    }
}
