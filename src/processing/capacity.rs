//! # Capacity Checks
//!
//! Every pixel lends one bit per RGB channel, so an image of
//! `width x height` pixels holds `width * height * 3` bits, framing included.
//!
//! Example: an 800x600 image holds 1,440,000 bits, which is 179,999 bytes of
//! text plus the terminator byte.

use log::debug;

use super::bits::BitStream;
use super::error::CapacityError;
use super::framer::Framing;
use super::pixel::{PixelBuffer, RgbPixel, CARRIER_CHANNELS};

/// Total number of bits `buffer` can carry.
pub fn capacity_bits<P: RgbPixel>(buffer: &PixelBuffer<P>) -> usize {
    let (width, height) = buffer.dimensions();
    width as usize * height as usize * CARRIER_CHANNELS
}

/// Reject `bits` if it does not fit into `buffer`.
///
/// # Errors
/// - [`CapacityError::PayloadTooLarge`] when the stream is longer than
///   [`capacity_bits`]
pub fn check<P: RgbPixel>(buffer: &PixelBuffer<P>, bits: &BitStream) -> Result<(), CapacityError> {
    let capacity = capacity_bits(buffer);
    let required = bits.len();

    debug!("Capacity check: need {} bits, have {} bits", required, capacity);

    if required > capacity {
        return Err(CapacityError::PayloadTooLarge {
            required_bits: required,
            capacity_bits: capacity,
        });
    }
    Ok(())
}

/// Largest payload, in bytes, that fits in `buffer` once framed.
///
/// `None` when the image cannot even hold the framing of an empty payload.
pub fn max_payload_bytes<P: RgbPixel>(buffer: &PixelBuffer<P>, framing: Framing) -> Option<usize> {
    (capacity_bits(buffer) / 8).checked_sub(framing.overhead_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::framer::{frame, frame_with};
    use image::{RgbImage, RgbaImage};

    #[test]
    fn test_capacity_ignores_alpha() {
        assert_eq!(capacity_bits(&RgbaImage::new(4, 4)), 48);
        assert_eq!(capacity_bits(&RgbImage::new(4, 4)), 48);
        assert_eq!(capacity_bits(&RgbImage::new(0, 7)), 0);
    }

    #[test]
    fn test_check_too_large() {
        let buffer = RgbImage::new(2, 2);
        assert_eq!(
            check(&buffer, &frame("A")),
            Err(CapacityError::PayloadTooLarge {
                required_bits: 16,
                capacity_bits: 12,
            })
        );
    }

    #[test]
    fn test_check_exact_fit() {
        // 8 pixels = 24 bits = two payload bytes plus terminator
        let buffer = RgbImage::new(8, 1);
        assert!(check(&buffer, &frame("hi")).is_ok());
        assert!(check(&buffer, &frame("hey")).is_err());
    }

    #[test]
    fn test_max_payload_bytes() {
        let buffer = RgbImage::new(8, 1);
        assert_eq!(max_payload_bytes(&buffer, Framing::Terminated), Some(2));
        assert!(check(&buffer, &frame("hi")).is_ok());

        // 24 bits cannot hold the 32-bit length header
        assert_eq!(max_payload_bytes(&buffer, Framing::LengthPrefixed), None);
        let empty = frame_with("", Framing::LengthPrefixed).unwrap();
        assert!(check(&buffer, &empty).is_err());

        // 11x1 = 33 bits: header fits, nothing else
        let buffer = RgbImage::new(11, 1);
        assert_eq!(max_payload_bytes(&buffer, Framing::LengthPrefixed), Some(0));
        assert!(check(&buffer, &empty).is_ok());
    }

    #[test]
    fn test_max_payload_bytes_terminator_does_not_fit() {
        // 3 bits, the terminator alone needs 8
        let buffer = RgbImage::new(1, 1);
        assert_eq!(max_payload_bytes(&buffer, Framing::Terminated), None);
        assert!(check(&buffer, &frame("")).is_err());

        // 9 bits: room for the terminator and nothing else
        let buffer = RgbImage::new(3, 1);
        assert_eq!(max_payload_bytes(&buffer, Framing::Terminated), Some(0));
        assert!(check(&buffer, &frame("")).is_ok());
    }
}
