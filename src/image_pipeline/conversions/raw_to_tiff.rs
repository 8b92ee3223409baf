use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::checks::{read_input_file, validate_dimensions},
    debayer::NearestNeighborDebayer,
    raw::{RawImageReader, RawLoaderReader},
    tiff::{ConversionConfig, StandardTiffWriter, TiffFrame, TiffWriter},
};

/// Decodes a camera RAW file, demosaics it with the sensor's own phase and
/// writes a 16-bit RGB TIFF.
pub struct RawToTiffPipeline<R: RawImageReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl RawToTiffPipeline<RawLoaderReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: RawImageReader, W: TiffWriter> RawToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting RAW to TIFF conversion");

        let raw = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        validate_dimensions(&self.config, raw.width(), raw.height())?;

        let rgb = {
            let _span = tracing::info_span!("debayer", phase = %raw.phase).entered();
            NearestNeighborDebayer::new(raw.phase).process(raw.mosaic.view())?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(&TiffFrame::Rgb16(rgb.view()), output, &self.config)?;
        }

        info!(
            width = raw.width(),
            height = raw.height(),
            bits_per_sample = raw.bits_per_sample,
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = read_input_file(input_path)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
