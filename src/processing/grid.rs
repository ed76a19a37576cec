//! # Pixel Grid
//!
//! In-memory RGB pixel data the codec operates on.
//!
//! A [`PixelGrid`] stores its pixels row-major (top to bottom, left to right)
//! as one flat buffer of channel values, three per pixel. That buffer *is* the
//! channel stream: position `i` is channel `i % 3` of pixel `i / 3`. Encoder
//! and decoder both walk it in this order.

use super::error::StegoError;

/// Channel values per pixel.
pub const CHANNELS: usize = 3;

/// One RGB pixel. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel(pub [u8; CHANNELS]);

impl Pixel {
    pub fn new(c0: u8, c1: u8, c2: u8) -> Self {
        Self([c0, c1, c2])
    }

    pub fn channels(&self) -> [u8; CHANNELS] {
        self.0
    }
}

/// How many payload bits a grid can carry.
///
/// One channel position is held back for the end-of-data sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Capacity {
    pub bits: usize,
}

impl Capacity {
    pub fn for_channels(channel_count: usize) -> Self {
        Self {
            bits: channel_count.saturating_sub(1),
        }
    }

    /// Whole payload bytes that fit.
    pub fn bytes(&self) -> usize {
        self.bits / 8
    }

    pub fn fits(&self, bit_count: usize) -> bool {
        bit_count <= self.bits
    }
}

/// A `width` × `height` grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl PixelGrid {
    /// Builds a grid from a flat row-major channel buffer.
    ///
    /// # Errors
    /// [`StegoError::UnsupportedPixelFormat`] if the buffer does not hold
    /// exactly three channels for every pixel.
    pub fn from_raw(width: u32, height: u32, channels: Vec<u8>) -> Result<Self, StegoError> {
        let expected = channel_count(width, height);
        if channels.len() != expected {
            return Err(StegoError::UnsupportedPixelFormat(format!(
                "{}x{} grid needs {} channel values, got {}",
                width,
                height,
                expected,
                channels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
        })
    }

    /// Builds a grid from pixels listed in row-major order.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Pixel]) -> Result<Self, StegoError> {
        let channels = pixels.iter().flat_map(|p| p.channels()).collect();
        Self::from_raw(width, height, channels)
    }

    /// A grid with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let pixel_count = channel_count(width, height) / CHANNELS;
        let channels = std::iter::repeat(pixel.channels())
            .take(pixel_count)
            .flatten()
            .collect();

        Self {
            width,
            height,
            channels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn capacity(&self) -> Capacity {
        Capacity::for_channels(self.channels.len())
    }

    /// The channel stream.
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.channels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.channels
    }
}

fn channel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_reserves_sentinel() {
        let grid = PixelGrid::filled(4, 4, Pixel::default());
        assert_eq!(grid.capacity().bits, 47);
        assert_eq!(grid.capacity().bytes(), 5);
        assert!(grid.capacity().fits(47));
        assert!(!grid.capacity().fits(48));

        let empty = PixelGrid::filled(0, 3, Pixel::default());
        assert_eq!(empty.capacity().bits, 0);
    }

    #[test]
    fn test_row_major_layout() {
        let pixels: Vec<Pixel> = (0..6u8).map(|i| Pixel::new(i, i + 10, i + 20)).collect();
        let grid = PixelGrid::from_pixels(3, 2, &pixels).unwrap();

        // second row starts at pixel 3
        assert_eq!(&grid.channels()[..6], &[0, 10, 20, 1, 11, 21]);
        assert_eq!(&grid.channels()[9..12], &[3, 13, 23]);
        assert_eq!(grid.channels().len(), 18);
    }

    #[test]
    fn test_rejects_short_buffer() {
        let result = PixelGrid::from_raw(2, 2, vec![0; 11]);
        assert!(matches!(
            result,
            Err(StegoError::UnsupportedPixelFormat(_))
        ));

        // RGBA-sized buffer is not an RGB grid either
        assert!(PixelGrid::from_raw(2, 2, vec![0; 16]).is_err());
    }
}
