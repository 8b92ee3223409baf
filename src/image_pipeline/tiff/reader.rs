use std::io::Cursor;

use ndarray::{s, Array3};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::types::ColorImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<ColorImage>;
}

/// Reads gray, RGB and RGBA TIFF files with 8 or 16 bits per sample.
///
/// Alpha is dropped and gray is replicated into all three planes.
pub struct TiffImageReader;

fn to_rgb<T: Clone>(samples: Vec<T>, height: usize, width: usize, channels: usize) -> Result<Array3<T>> {
    let image = Array3::from_shape_vec((height, width, channels), samples)
        .map_err(|e| ConversionError::DecodeError(e.to_string()))?;
    Ok(match channels {
        3 => image,
        4 => image.slice(s![.., .., 0..3]).to_owned(),
        _ => Array3::from_shape_fn((height, width, 3), |(row, col, _)| image[[row, col, 0]].clone()),
    })
}

impl ImageReader for TiffImageReader {
    fn read_image(&self, data: &[u8]) -> Result<ColorImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let decode_err = |e: tiff::TiffError| ConversionError::DecodeError(e.to_string());
        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_err)?;
        let (width, height) = decoder.dimensions().map_err(decode_err)?;
        let (width, height) = (width as usize, height as usize);

        let channels = match decoder.colortype().map_err(decode_err)? {
            ColorType::Gray(8 | 16) => 1,
            ColorType::RGB(8 | 16) => 3,
            ColorType::RGBA(8 | 16) => 4,
            other => return Err(ConversionError::UnsupportedFormat(format!("{other:?}"))),
        };

        debug!("Decoded image: {}x{}, {} channels", width, height, channels);

        match decoder.read_image().map_err(decode_err)? {
            DecodingResult::U8(samples) => Ok(ColorImage::Rgb8(to_rgb(samples, height, width, channels)?)),
            DecodingResult::U16(samples) => Ok(ColorImage::Rgb16(to_rgb(samples, height, width, channels)?)),
            _ => Err(ConversionError::UnsupportedFormat(
                "only 8 and 16 bit integer samples are supported".to_string(),
            )),
        }
    }
}
