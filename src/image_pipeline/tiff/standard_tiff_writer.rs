use std::io::{Cursor, Write};

use ndarray::{ArrayBase, Data, Dimension};
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::{TiffFrame, TiffWriter};

pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn encode<C>(&self, width: u32, height: u32, data: &[C::Inner], config: &ConversionConfig) -> Result<Vec<u8>>
    where
        C: ColorType,
        [C::Inner]: TiffValue,
    {
        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<C>(width, height, data)
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }
        Ok(buffer)
    }

    fn encode_view<C, S, D>(&self, view: &ArrayBase<S, D>, config: &ConversionConfig) -> Result<Vec<u8>>
    where
        C: ColorType,
        [C::Inner]: TiffValue,
        C::Inner: Clone,
        S: Data<Elem = C::Inner>,
        D: Dimension,
    {
        let shape = view.shape();
        let (height, width) = (shape[0] as u32, shape[1] as u32);
        let standard = view.as_standard_layout();
        let data = standard
            .as_slice()
            .ok_or_else(|| ConversionError::EncodeError("frame is not contiguous".to_string()))?;
        self.encode::<C>(width, height, data, config)
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, frame: &TiffFrame<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let (height, width) = frame.dim();
        debug!("Encoding TIFF image: {}x{}", width, height);

        let buffer = match frame {
            TiffFrame::Gray8(view) => self.encode_view::<colortype::Gray8, _, _>(view, config)?,
            TiffFrame::Gray16(view) => self.encode_view::<colortype::Gray16, _, _>(view, config)?,
            TiffFrame::Rgb8(view) => self.encode_view::<colortype::RGB8, _, _>(view, config)?,
            TiffFrame::Rgb16(view) => self.encode_view::<colortype::RGB16, _, _>(view, config)?,
        };

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
