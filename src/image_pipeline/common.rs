//! Common utilities module
//!
//! This module contains shared error and sample types used across the image pipeline.

pub mod error;
pub mod sample;

pub use error::{BayerError, ConversionError, Result};
pub use sample::Sample;
