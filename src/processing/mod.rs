//! # LSB Steganography Codec
//!
//! Hides a text payload in the least significant bit of each RGB channel of
//! an image, and recovers it again.
//!
//! ## Encoding Process
//! 1. Convert the text to UTF-8 bytes and append a zero terminator byte
//! 2. Check the image has at least that many carrier channels
//! 3. Walk pixels row by row; for each R, G, B channel clear the LSB and set
//!    it to the next data bit (MSB of each byte first)
//!
//! ## Decoding Process
//! 1. Collect the LSB of every R, G, B channel of the whole image
//! 2. Group the bits into bytes and stop at the first zero byte
//! 3. Decode the bytes before it as UTF-8
//!
//! ## Capacity
//! An image holds `width * height * 3` bits, so roughly
//! `(width * height * 3) / 8 - 1` bytes of text.
//!
//! Everything here is synchronous and works on an in-memory pixel buffer.
//! Loading, saving and threading live in [`crate::image_io`] and
//! [`crate::worker`].

pub mod bits;
pub mod capacity;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framer;
pub mod pixel;
pub mod progress;

pub use bits::BitStream;
pub use capacity::{capacity_bits, check, max_payload_bytes};
pub use decoder::{decode, decode_with, extract_bits};
pub use encoder::{embed_bits, encode, encode_with};
pub use error::{CapacityError, DecodeError, StegoError};
pub use framer::{frame, frame_with, unframe, unframe_with, Framing};
pub use pixel::{PixelBuffer, RgbPixel};
pub use progress::{NoProgress, ProgressSink};
