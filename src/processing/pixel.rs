//! Pixel layouts the codec can write into.

use image::{ImageBuffer, Pixel, Rgb, Rgba};

/// Number of channels per pixel that carry hidden bits (R, G, B).
pub const CARRIER_CHANNELS: usize = 3;

/// An 8-bit pixel whose first three channels are red, green and blue.
///
/// Any further channel (alpha) is never read or written by the codec.
pub trait RgbPixel: Pixel<Subpixel = u8> {}

impl RgbPixel for Rgb<u8> {}
impl RgbPixel for Rgba<u8> {}

/// In-memory pixel grid handed to the encoder and decoder.
pub type PixelBuffer<P> = ImageBuffer<P, Vec<u8>>;
