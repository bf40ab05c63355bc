//! # lsb-stego
//!
//! Hide text in the least significant bits of an image's RGB channels and
//! read it back.
//!
//! ## Modules
//!
//! - [`processing`]: the synchronous codec (framing, capacity, encode, decode, progress)
//! - [`image_io`]: loading and saving pixel buffers
//! - [`worker`]: running the codec on a background thread with progress events
//! - [`common`]: configuration shared by the front end

pub mod common;
pub mod image_io;
pub mod processing;
pub mod worker;

pub use processing::{decode, encode, CapacityError, DecodeError, Framing, StegoError};
