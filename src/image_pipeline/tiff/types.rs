//! TIFF conversion configuration types

use ndarray::Array3;

use crate::image_pipeline::bayer::Phase;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

/// Decoded color image at its native sample width.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorImage {
    Rgb8(Array3<u8>),
    Rgb16(Array3<u16>),
}

impl ColorImage {
    /// `(height, width)` of the image.
    pub fn dim(&self) -> (usize, usize) {
        let (height, width, _) = match self {
            Self::Rgb8(image) => image.dim(),
            Self::Rgb16(image) => image.dim(),
        };
        (height, width)
    }

    pub fn bits_per_sample(&self) -> u32 {
        match self {
            Self::Rgb8(_) => 8,
            Self::Rgb16(_) => 16,
        }
    }
}

/// Configuration for mosaic simulation and RAW conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Sensor phase used to sample the reference image
    pub phase: Phase,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Note: Predictor adds processing time, set to None for maximum speed
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Integer nearest-neighbour scale applied to written previews (1 = off)
    pub upscale: usize,
    /// Whether to write the false-color mosaic alongside the reconstruction
    pub write_mosaic: bool,
    /// Whether to write the reference/reconstruction difference image
    pub write_difference: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            phase: Phase::RGGB,
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            upscale: 1,
            write_mosaic: true,
            write_difference: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    phase: Option<Phase>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    upscale: Option<usize>,
    write_mosaic: Option<bool>,
    write_difference: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn upscale(mut self, factor: usize) -> Self {
        self.upscale = Some(factor);
        self
    }

    pub fn write_mosaic(mut self, enable: bool) -> Self {
        self.write_mosaic = Some(enable);
        self
    }

    pub fn write_difference(mut self, enable: bool) -> Self {
        self.write_difference = Some(enable);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            phase: self.phase.unwrap_or(default.phase),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            upscale: self.upscale.unwrap_or(default.upscale),
            write_mosaic: self.write_mosaic.unwrap_or(default.write_mosaic),
            write_difference: self.write_difference.unwrap_or(default.write_difference),
        }
    }
}
