//! RAW image data types

use ndarray::Array2;

use crate::image_pipeline::bayer::Phase;

/// Decoded RAW sensor data
#[derive(Debug, Clone)]
pub struct RawMosaic {
    /// Single channel Bayer mosaic, cropped to even dimensions
    pub mosaic: Array2<u16>,
    /// Phase of the sensor's color filter at the top-left corner of `mosaic`
    pub phase: Phase,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
}

impl RawMosaic {
    pub fn width(&self) -> usize {
        self.mosaic.ncols()
    }

    pub fn height(&self) -> usize {
        self.mosaic.nrows()
    }
}
