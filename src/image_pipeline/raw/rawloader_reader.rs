//! RAW image reader implementation using the rawloader library.
//!
//! Supports any format rawloader can decode (ARW, CR2, NEF, DNG, ...) as long
//! as the sensor carries a 2x2 Bayer filter.

use std::io::Cursor;

use ndarray::{s, Array2};
use rawloader::RawImageData as RawloaderImageData;
use tracing::{debug, warn};

use crate::image_pipeline::bayer::{Channel, Phase};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::RawMosaic;

/// RAW image reader that uses the rawloader library for decoding.
pub struct RawLoaderReader;

/// Default bit depth when no white level information is available from the RAW file.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

/// Builds a [`Phase`] from a color lookup using rawloader's channel numbering
/// (0 red, 1 green, 2 blue).
pub fn phase_from_cfa(color_at: impl Fn(usize, usize) -> usize) -> Result<Phase> {
    let mut tile = [Channel::Green; 4];
    for (i, slot) in tile.iter_mut().enumerate() {
        *slot = match color_at(i / 2, i % 2) {
            0 => Channel::Red,
            1 => Channel::Green,
            2 => Channel::Blue,
            other => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "CFA color index {other} is not red, green or blue"
                )));
            }
        };
    }
    Ok(Phase::new(tile)?)
}

impl RawImageReader for RawLoaderReader {
    /// Decodes a RAW file into a mosaic with its sensor phase.
    ///
    /// Integer data is used as-is, float data (normalized 0.0-1.0) is scaled
    /// to the u16 range. A trailing odd row or column is cropped so the mosaic
    /// tiles exactly.
    fn read_raw(&self, data: &[u8]) -> Result<RawMosaic> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "expected one component per pixel, got {}",
                decoded.cpp
            )));
        }

        let width = decoded.width;
        let height = decoded.height;
        debug!("Decoded image: {}x{}, CFA {}", width, height, decoded.cfa.name);

        let phase = phase_from_cfa(|row, col| decoded.cfa.color_at(row, col))?;

        let samples: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            RawloaderImageData::Float(values) => {
                values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect()
            }
        };
        let full = Array2::from_shape_vec((height, width), samples)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let (even_height, even_width) = (height & !1, width & !1);
        if (even_height, even_width) != (height, width) {
            warn!(
                "Cropping {}x{} mosaic to {}x{} for 2x2 tiling",
                width, height, even_width, even_height
            );
        }
        let mosaic = full.slice(s![..even_height, ..even_width]).to_owned();

        // The white level is the largest value the sensor can produce, which
        // gives its real bit depth (4095 -> 12 bits, 16383 -> 14 bits).
        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = if max_white_level == 0 {
            DEFAULT_BITS_PER_SAMPLE
        } else {
            U16_BITS - max_white_level.leading_zeros()
        };

        debug!("Calculated bits_per_sample: {} (max white level: {})", bits_per_sample, max_white_level);

        Ok(RawMosaic {
            mosaic,
            phase,
            bits_per_sample,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_rggb_lookup() {
        let lookup = |row: usize, col: usize| -> usize { [[0, 1], [1, 2]][row % 2][col % 2] };
        assert_eq!(phase_from_cfa(lookup).unwrap(), Phase::RGGB);
    }

    #[test]
    fn phase_from_gbrg_lookup() {
        let lookup = |row: usize, col: usize| -> usize { [[1, 2], [0, 1]][row % 2][col % 2] };
        assert_eq!(phase_from_cfa(lookup).unwrap(), Phase::GBRG);
    }

    #[test]
    fn emerald_channel_is_unsupported() {
        let lookup = |row: usize, col: usize| -> usize { [[0, 3], [1, 2]][row % 2][col % 2] };
        assert!(matches!(
            phase_from_cfa(lookup),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn non_bayer_layout_is_rejected() {
        let lookup = |_: usize, _: usize| -> usize { 1 };
        assert!(matches!(phase_from_cfa(lookup), Err(ConversionError::Bayer(_))));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            RawLoaderReader.read_raw(b"definitely not a raw file"),
            Err(ConversionError::DecodeError(_))
        ));
    }
}
