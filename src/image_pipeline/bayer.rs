//! Bayer color filter array simulation
//!
//! Phase handling, per-channel occupancy masks and the sampling transform that
//! turns a full-color image into what a sensor behind the filter would record.

pub mod phase;
mod mask;
mod sampler;

pub use phase::{Channel, Phase};
pub use mask::{bayer_masks, validate_tiling, ColorMasks};
pub use sampler::{mosaic, mosaic_color};
