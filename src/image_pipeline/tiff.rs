//! TIFF reading and writing module
//!
//! This module loads reference images and persists mosaics and reconstructions
//! as TIFF files with various compression options.

mod reader;
mod writer;
mod standard_tiff_writer;
pub mod types;

pub use reader::{ImageReader, TiffImageReader};
pub use writer::{TiffFrame, TiffSample, TiffWriter};
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ColorImage, TiffCompression, ConversionConfig, ConversionConfigBuilder};
