//! # Common Components
//!
//! Shared utilities used by the binary and the worker.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration and output path resolution

pub mod config;
