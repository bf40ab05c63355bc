//! # Payload Framing
//!
//! Turns a text payload into a bit stream that carries its own end marker,
//! and back again.
//!
//! ## Formats
//!
//! - [`Framing::Terminated`] (default): `[payload bytes][0x00]`. The first
//!   zero byte ends the message, so a payload containing NUL is cut short
//!   at that point.
//! - [`Framing::LengthPrefixed`]: `[4 bytes: length, big-endian][payload bytes]`.
//!   Handles any payload, including embedded NUL, but is not readable by
//!   tools that only know the terminated layout.

use log::trace;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::bits::BitStream;
use super::error::{CapacityError, DecodeError};

/// The byte that ends a terminated frame.
pub const TERMINATOR: u8 = 0x00;

/// Size of the length header used by [`Framing::LengthPrefixed`].
pub const LENGTH_HEADER_BYTES: usize = 4;

/// How a payload is delimited inside the bit stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// Payload followed by a single zero byte
    #[default]
    Terminated,
    /// 32-bit big-endian byte count followed by the payload
    LengthPrefixed,
}

impl Framing {
    /// Bytes of framing overhead added around a payload.
    pub fn overhead_bytes(self) -> usize {
        match self {
            Framing::Terminated => 1,
            Framing::LengthPrefixed => LENGTH_HEADER_BYTES,
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::Terminated => write!(f, "terminated"),
            Framing::LengthPrefixed => write!(f, "length-prefixed"),
        }
    }
}

impl FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminated" => Ok(Framing::Terminated),
            "length-prefixed" => Ok(Framing::LengthPrefixed),
            other => Err(format!(
                "unknown framing '{}' (expected 'terminated' or 'length-prefixed')",
                other
            )),
        }
    }
}

/// Frame `payload` with the default terminated layout. Never fails.
pub fn frame(payload: &str) -> BitStream {
    let data = payload.as_bytes();
    let mut bits = BitStream::with_capacity((data.len() + 1) * 8);
    for &byte in data {
        bits.push_byte(byte);
    }
    bits.push_byte(TERMINATOR);

    trace!("Framed {} payload bytes into {} bits", data.len(), bits.len());
    bits
}

/// Frame `payload` using the given layout.
///
/// # Errors
/// - [`CapacityError::LengthOverflow`] when a length-prefixed payload is
///   longer than `u32::MAX` bytes
pub fn frame_with(payload: &str, framing: Framing) -> Result<BitStream, CapacityError> {
    match framing {
        Framing::Terminated => Ok(frame(payload)),
        Framing::LengthPrefixed => {
            let data = payload.as_bytes();
            let header = length_header(data.len())?;

            let mut bits = BitStream::with_capacity((data.len() + LENGTH_HEADER_BYTES) * 8);
            for byte in header {
                bits.push_byte(byte);
            }
            for &byte in data {
                bits.push_byte(byte);
            }

            trace!("Framed {} payload bytes into {} bits", data.len(), bits.len());
            Ok(bits)
        }
    }
}

/// Big-endian length header for a payload of `len` bytes.
fn length_header(len: usize) -> Result<[u8; LENGTH_HEADER_BYTES], CapacityError> {
    let length =
        u32::try_from(len).map_err(|_| CapacityError::LengthOverflow { payload_bytes: len })?;
    Ok(length.to_be_bytes())
}

/// Recover a payload framed with the default terminated layout.
///
/// Only complete bytes are considered. Scanning stops at the first zero
/// byte; if none is found, every complete byte belongs to the payload.
///
/// # Errors
/// - [`DecodeError::InvalidTextEncoding`] when the bytes before the
///   terminator are not UTF-8
pub fn unframe(bits: &BitStream) -> Result<String, DecodeError> {
    unframe_with(bits, Framing::Terminated)
}

/// Recover a payload framed with the given layout.
pub fn unframe_with(bits: &BitStream, framing: Framing) -> Result<String, DecodeError> {
    let bytes = bits.complete_bytes();

    let payload = match framing {
        Framing::Terminated => match bytes.iter().position(|&b| b == TERMINATOR) {
            Some(end) => &bytes[..end],
            None => {
                trace!("No terminator in {} bytes, using all of them", bytes.len());
                bytes
            }
        },
        Framing::LengthPrefixed => {
            if bytes.len() < LENGTH_HEADER_BYTES {
                return Err(DecodeError::MissingLengthHeader {
                    available_bytes: bytes.len(),
                });
            }
            let available = bytes.len() - LENGTH_HEADER_BYTES;

            let mut header = [0u8; LENGTH_HEADER_BYTES];
            header.copy_from_slice(&bytes[..LENGTH_HEADER_BYTES]);
            let declared = u32::from_be_bytes(header) as usize;

            if declared > available {
                return Err(DecodeError::TruncatedPayload {
                    declared_bytes: declared,
                    available_bytes: available,
                });
            }
            &bytes[LENGTH_HEADER_BYTES..LENGTH_HEADER_BYTES + declared]
        }
    };

    Ok(String::from_utf8(payload.to_vec())?)
}
