//! # LSB Decoder
//!
//! Reads the least significant bit of every R, G and B channel in the same
//! order the encoder writes them, then hands the recovered stream to the
//! framer.
//!
//! The whole image is always read. The end of the message is only located
//! afterwards, while unframing.

use log::debug;

use super::bits::BitStream;
use super::capacity;
use super::error::DecodeError;
use super::framer::{self, Framing};
use super::pixel::{PixelBuffer, RgbPixel, CARRIER_CHANNELS};
use super::progress::{ProgressSink, ProgressTracker};

/// Recover text hidden with the default terminated framing.
///
/// # Errors
/// - [`DecodeError::InvalidTextEncoding`] if the hidden bytes are not UTF-8
///
/// # Example
/// ```ignore
/// let image = image::open("encoded.png")?.to_rgba8();
/// let secret = decode(&image, &mut NoProgress)?;
/// println!("Extracted: {}", secret);
/// ```
pub fn decode<P, S>(buffer: &PixelBuffer<P>, progress: &mut S) -> Result<String, DecodeError>
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    decode_with(buffer, Framing::Terminated, progress)
}

/// Recover text hidden with the given framing.
pub fn decode_with<P, S>(
    buffer: &PixelBuffer<P>,
    framing: Framing,
    progress: &mut S,
) -> Result<String, DecodeError>
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    let bits = extract_bits(buffer, progress);
    framer::unframe_with(&bits, framing)
}

/// Read the LSB of every carrier channel in `buffer`.
pub fn extract_bits<P, S>(buffer: &PixelBuffer<P>, progress: &mut S) -> BitStream
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    let total_pixels = buffer.width() as u64 * buffer.height() as u64;
    let mut bits = BitStream::with_capacity(capacity::capacity_bits(buffer));
    let mut tracker = ProgressTracker::new(progress, total_pixels, CARRIER_CHANNELS as u64);

    for pixel in buffer.pixels() {
        for &channel in pixel.channels().iter().take(CARRIER_CHANNELS) {
            bits.push(channel & 1);
            tracker.advance(1);
        }
    }

    tracker.finish();
    debug!("Extracted {} bits from {} pixels", bits.len(), total_pixels);
    bits
}
