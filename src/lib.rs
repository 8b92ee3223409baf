//! Bayer color filter array simulation and nearest-neighbour demosaicing.
//!
//! The [`image_pipeline`] module holds the core (mask generation, mosaic
//! sampling, reconstruction and array shifting) along with the TIFF/RAW
//! adapters and conversion pipelines built on top of it.

pub mod image_pipeline;
pub mod logger;
