//! # LSB Encoder
//!
//! Writes a framed payload into the least significant bit of each R, G and B
//! channel, walking pixels left to right, top to bottom.
//!
//! ```text
//! pixel 0          pixel 1          pixel 2
//! [R0 G0 B0 (A)]   [R1 G1 B1 (A)]   [R2 G2 B2 (A)] ...
//!  b0 b1 b2         b3 b4 b5         b6 b7 b8
//! ```
//!
//! Channels past the end of the stream keep their original values, as does
//! the alpha channel of every pixel.

use log::debug;

use super::bits::BitStream;
use super::capacity;
use super::error::CapacityError;
use super::framer::{self, Framing};
use super::pixel::{PixelBuffer, RgbPixel, CARRIER_CHANNELS};
use super::progress::{ProgressSink, ProgressTracker};

/// Hide `payload` in `buffer` using the default terminated framing.
///
/// # Errors
/// - [`CapacityError::PayloadTooLarge`] if the framed payload does not fit.
///   The buffer is left untouched in that case.
///
/// # Example
/// ```ignore
/// let mut image = image::open("cover.png")?.to_rgba8();
/// encode(&mut image, "Secret message", &mut NoProgress)?;
/// image.save("encoded.png")?;
/// ```
pub fn encode<P, S>(
    buffer: &mut PixelBuffer<P>,
    payload: &str,
    progress: &mut S,
) -> Result<(), CapacityError>
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    encode_with(buffer, payload, Framing::Terminated, progress)
}

/// Hide `payload` in `buffer` using the given framing.
///
/// Besides [`CapacityError::PayloadTooLarge`], length-prefixed framing fails
/// with [`CapacityError::LengthOverflow`] for payloads over `u32::MAX` bytes.
pub fn encode_with<P, S>(
    buffer: &mut PixelBuffer<P>,
    payload: &str,
    framing: Framing,
    progress: &mut S,
) -> Result<(), CapacityError>
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    let bits = framer::frame_with(payload, framing)?;
    embed_bits(buffer, &bits, progress)
}

/// Write `bits` into the channel LSBs of `buffer`.
///
/// Every pixel is visited so that progress covers the whole image, but only
/// the first `bits.len()` carrier channels are modified.
pub fn embed_bits<P, S>(
    buffer: &mut PixelBuffer<P>,
    bits: &BitStream,
    progress: &mut S,
) -> Result<(), CapacityError>
where
    P: RgbPixel,
    S: ProgressSink + ?Sized,
{
    // Must run before the first write so a rejected payload leaves no trace
    capacity::check(buffer, bits)?;

    let total_pixels = buffer.width() as u64 * buffer.height() as u64;
    debug!(
        "Embedding {} bits into {}x{} image",
        bits.len(),
        buffer.width(),
        buffer.height()
    );

    let mut tracker = ProgressTracker::new(progress, total_pixels, 1);
    let mut next_bit = bits.iter();

    for pixel in buffer.pixels_mut() {
        for channel in pixel.channels_mut().iter_mut().take(CARRIER_CHANNELS) {
            if let Some(bit) = next_bit.next() {
                *channel = (*channel & !1) | bit;
            }
        }
        tracker.advance(1);
    }

    tracker.finish();
    Ok(())
}
