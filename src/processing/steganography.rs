//! # Image Steganography
//!
//! Glue between image files and the parity codec.
//!
//! ## Encoding
//! 1. Load the cover image and convert it to 8-bit RGB
//! 2. Check the payload against the grid capacity (`width * height * 3 - 1` bits)
//! 3. Expand the payload into bits, MSB first
//! 4. Write one bit per channel (R → G → B → next pixel), then the end marker
//! 5. Save the result as PNG
//!
//! ## Decoding
//! 1. Load the image, refusing anything that is not 8-bit RGB or RGBA
//! 2. Read channel parities until the end marker
//! 3. Fold the bits back into bytes
//!
//! ## Capacity
//! An image stores `(width * height * 3 - 1) / 8` bytes.
//!
//! Example: a 512x512 image holds 98303 bytes.

use std::io::Cursor;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat, RgbImage};
use log::{info, warn};

use super::bits::{self, BitPacker};
use super::decoder::decode;
use super::encoder::encode;
use super::error::StegoError;
use super::grid::PixelGrid;

/// How an image's pixel format is turned into RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// Convert any colour type to 8-bit RGB. Used for cover images.
    Convert,
    /// Accept only 8-bit RGB or RGBA, dropping alpha. Any conversion would
    /// change channel parities, so carrier images must be read this way.
    Strict,
}

/// Payload recovered from an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub payload: Vec<u8>,
    /// `false` if the image had no end marker; `payload` is then unreliable.
    pub complete: bool,
    pub bits_read: usize,
}

/// Builds a pixel grid from a decoded image.
pub fn grid_from_image(img: &DynamicImage, mode: PixelMode) -> Result<PixelGrid, StegoError> {
    let rgb = match (mode, img.color()) {
        (PixelMode::Convert, _) | (PixelMode::Strict, ColorType::Rgb8 | ColorType::Rgba8) => {
            img.to_rgb8()
        }
        (PixelMode::Strict, other) => {
            return Err(StegoError::UnsupportedPixelFormat(format!(
                "{:?} has no three 8-bit colour channels",
                other
            )))
        }
    };

    let (width, height) = rgb.dimensions();
    PixelGrid::from_raw(width, height, rgb.into_raw())
}

pub fn grid_to_image(grid: &PixelGrid) -> Result<RgbImage, StegoError> {
    RgbImage::from_raw(grid.width(), grid.height(), grid.channels().to_vec()).ok_or_else(|| {
        StegoError::UnsupportedPixelFormat(format!(
            "{}x{} buffer does not fit an RGB image",
            grid.width(),
            grid.height()
        ))
    })
}

pub fn load_grid<P: AsRef<Path>>(path: P, mode: PixelMode) -> Result<PixelGrid, StegoError> {
    let img = image::open(path)?;
    grid_from_image(&img, mode)
}

/// Saves `grid` as PNG, whatever extension `path` has.
pub fn save_grid<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<(), StegoError> {
    grid_to_image(grid)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Hides `payload` in a copy of `grid`.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if the payload does not fit.
pub fn embed_payload(grid: &PixelGrid, payload: &[u8]) -> Result<PixelGrid, StegoError> {
    let bits: Vec<_> = BitPacker::new(payload).collect();
    let encoded = encode(grid, &bits)?;

    info!("Encoded {} bytes", payload.len());
    Ok(encoded)
}

/// Recovers the payload hidden in `grid`.
///
/// A missing end marker is not an error here: whatever was read is returned
/// with `complete` set to `false`.
pub fn extract_payload(grid: &PixelGrid) -> Extracted {
    let decoded = decode(grid);
    let complete = decoded.is_complete();
    let payload = bits::unpack(&decoded.bits);

    if decoded.bits.len() % 8 != 0 {
        warn!(
            "Dropping {} trailing bits that do not form a byte",
            decoded.bits.len() % 8
        );
    }
    info!("Decoded {} bytes", payload.len());

    Extracted {
        payload,
        complete,
        bits_read: decoded.bits.len(),
    }
}

/// Hides `payload` in an encoded image and returns PNG bytes.
///
/// # Example
/// ```ignore
/// let cover = std::fs::read("cover.jpg")?;
/// let carrier = embed_bytes(&cover, b"secret")?;
/// std::fs::write("carrier.png", carrier)?;
/// ```
pub fn embed_bytes(image_bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>, StegoError> {
    let img = image::load_from_memory(image_bytes)?;
    let grid = grid_from_image(&img, PixelMode::Convert)?;
    let encoded = embed_payload(&grid, payload)?;

    let mut output_bytes = Vec::new();
    grid_to_image(&encoded)?.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;

    Ok(output_bytes)
}

/// Recovers the payload from encoded image bytes (PNG or another lossless
/// format).
pub fn extract_bytes(image_bytes: &[u8]) -> Result<Extracted, StegoError> {
    let img = image::load_from_memory(image_bytes)?;
    let grid = grid_from_image(&img, PixelMode::Strict)?;
    Ok(extract_payload(&grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_embed_extract_bytes() {
        let cover = DynamicImage::ImageRgb8(RgbImage::from_fn(16, 16, |x, y| {
            image::Rgb([(x * 16) as u8, (y * 16) as u8, 255])
        }));

        let carrier = embed_bytes(&png_bytes(&cover), b"hello, parity").unwrap();
        let extracted = extract_bytes(&carrier).unwrap();

        assert!(extracted.complete);
        assert_eq!(extracted.payload, b"hello, parity".to_vec());
        assert_eq!(extracted.bits_read, 13 * 8);
    }

    #[test]
    fn test_strict_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 200])));
        let grid = grid_from_image(&img, PixelMode::Strict).unwrap();
        assert_eq!(grid.channels(), &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_strict_rejects_grayscale() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([7])));
        assert!(matches!(
            grid_from_image(&img, PixelMode::Strict),
            Err(StegoError::UnsupportedPixelFormat(_))
        ));

        // the cover path converts instead
        let grid = grid_from_image(&img, PixelMode::Convert).unwrap();
        assert_eq!(&grid.channels()[9..], &[7, 7, 7]);
    }

    #[test]
    fn test_embed_bytes_too_small() {
        let cover = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let err = embed_bytes(&png_bytes(&cover), &[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 100,
                available: 5
            }
        ));
    }
}
