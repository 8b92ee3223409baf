//! RAW image reading module
//!
//! This module decodes camera RAW files into Bayer mosaics ready for demosaicing.

mod reader;
mod rawloader_reader;
pub mod types;

pub use reader::RawImageReader;
pub use rawloader_reader::{phase_from_cfa, RawLoaderReader};
pub use types::RawMosaic;
