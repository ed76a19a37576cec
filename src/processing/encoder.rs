//! # Parity Encoder
//!
//! Writes a bit sequence into the channel stream of a [`PixelGrid`].
//!
//! Bit `i` goes into channel position `i`: an even value carries a one, an
//! odd value carries a zero. A value that already has the right parity is
//! left alone, otherwise it moves by one step towards the middle of the range
//! (down when above 128, up otherwise). Data positions never hold 0, because 0
//! marks the end of the data: it is written once, right after the last bit.

use log::debug;

use super::bits::Bit;
use super::error::StegoError;
use super::grid::PixelGrid;

/// Values above this move down when their parity has to flip.
pub const PIVOT: u8 = 128;

/// Channel value reserved for the end-of-data marker.
pub const SENTINEL: u8 = 0;

/// Returns a copy of `grid` carrying `bits`.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if `bits` is longer than the grid
/// capacity. Nothing is produced in that case.
pub fn encode(grid: &PixelGrid, bits: &[Bit]) -> Result<PixelGrid, StegoError> {
    check_capacity(grid, bits.len())?;

    let mut encoded = grid.clone();
    write_bits(&mut encoded, bits);
    Ok(encoded)
}

/// Same as [`encode`], mutating `grid` directly.
///
/// The capacity check runs first, so a grid that is too small is returned
/// untouched along with the error.
pub fn encode_in_place(grid: &mut PixelGrid, bits: &[Bit]) -> Result<(), StegoError> {
    check_capacity(grid, bits.len())?;
    write_bits(grid, bits);
    Ok(())
}

/// The value a channel holds after carrying `bit`.
pub fn embed_bit(value: u8, bit: Bit) -> u8 {
    let value = if value == SENTINEL { 1 } else { value };

    if bit.matches(value) {
        value
    } else if value > PIVOT {
        value - 1
    } else {
        value + 1
    }
}

fn check_capacity(grid: &PixelGrid, bit_count: usize) -> Result<(), StegoError> {
    let capacity = grid.capacity();

    // The sentinel needs a slot of its own, which an empty grid does not have.
    if capacity.fits(bit_count) && bit_count < grid.channels().len() {
        return Ok(());
    }

    Err(StegoError::CapacityExceeded {
        required: bit_count.div_ceil(8),
        available: capacity.bytes(),
    })
}

fn write_bits(grid: &mut PixelGrid, bits: &[Bit]) {
    let channels = grid.channels_mut();

    for (channel, &bit) in channels.iter_mut().zip(bits) {
        *channel = embed_bit(*channel, bit);
    }
    channels[bits.len()] = SENTINEL;

    debug!(
        "Wrote {} bits, end marker at channel {}",
        bits.len(),
        bits.len()
    );
}
