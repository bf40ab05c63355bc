//! # Codec Errors
//!
//! The codec has exactly two ways to fail on well-formed input: the payload
//! does not fit the cover image, or the recovered bytes are not text.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Raised before any pixel is touched when a bit stream cannot fit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("payload too large: need {required_bits} bits but image holds {capacity_bits}")]
    PayloadTooLarge {
        required_bits: usize,
        capacity_bits: usize,
    },

    /// Only produced by length-prefixed framing.
    #[error("payload of {payload_bytes} bytes does not fit a 32-bit length header")]
    LengthOverflow { payload_bytes: usize },
}

/// Raised when recovered bits cannot be turned back into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("hidden data is not valid UTF-8: {0}")]
    InvalidTextEncoding(#[from] FromUtf8Error),

    /// Only produced by length-prefixed framing.
    #[error("only {available_bytes} bytes present, too few for the 4-byte length header")]
    MissingLengthHeader { available_bytes: usize },

    /// Only produced by length-prefixed framing.
    #[error("length header declares {declared_bytes} bytes but only {available_bytes} are present")]
    TruncatedPayload {
        declared_bytes: usize,
        available_bytes: usize,
    },
}

/// Either codec failure, for callers that want a single error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
