use std::io::Write;
use std::path::Path;

use ndarray::{Array3, ArrayView2, ArrayView3};
use num_traits::Bounded;
use tracing::{info, instrument};

use crate::image_pipeline::{
    array_ops::upscale_nearest,
    bayer::{self, Phase},
    common::error::Result,
    conversions::checks::{read_input_file, validate_dimensions},
    conversions::{Artifact, ArtifactSink, DirectorySink, PipelineTimings},
    debayer::debayer,
    metrics::{difference_image, MetricsReport},
    tiff::{ColorImage, ConversionConfig, ImageReader, StandardTiffWriter, TiffImageReader, TiffSample, TiffWriter},
};

/// Outcome of one simulated capture and reconstruction.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub width: usize,
    pub height: usize,
    pub phase: Phase,
    pub bits_per_sample: u32,
    /// Reconstruction compared against the reference image
    pub metrics: MetricsReport,
    pub timings: PipelineTimings,
}

/// Samples a reference image through a Bayer filter, demosaics it and
/// reports how close the reconstruction is to the reference.
pub struct SimulationPipeline<R: ImageReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl SimulationPipeline<TiffImageReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: TiffImageReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: ImageReader, W: TiffWriter> SimulationPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn write_gray<T: TiffSample>(
        &self,
        sink: &mut dyn ArtifactSink,
        artifact: Artifact,
        image: ArrayView2<'_, T>,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let _span = tracing::info_span!("write_artifact", artifact = ?artifact).entered();
        let mut output = sink.create(artifact)?;
        timings.time(artifact.file_name(), || {
            self.writer
                .write_tiff(&T::gray_frame(image), &mut *output, &self.config)
        })?;
        output.flush()?;
        Ok(())
    }

    fn write_rgb<T: TiffSample>(
        &self,
        sink: &mut dyn ArtifactSink,
        artifact: Artifact,
        image: ArrayView3<'_, T>,
        scale: usize,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let _span = tracing::info_span!("write_artifact", artifact = ?artifact).entered();
        let scaled = upscale_nearest(image, scale)?;
        let mut output = sink.create(artifact)?;
        timings.time(artifact.file_name(), || {
            self.writer
                .write_tiff(&T::rgb_frame(scaled.view()), &mut *output, &self.config)
        })?;
        output.flush()?;
        Ok(())
    }

    fn simulate<T: TiffSample>(
        &self,
        reference: &Array3<T>,
        sink: &mut dyn ArtifactSink,
        timings: &mut PipelineTimings,
    ) -> Result<MetricsReport> {
        let phase = self.config.phase;

        let mosaic = {
            let _span = tracing::info_span!("mosaic", phase = %phase).entered();
            timings.time("mosaic", || bayer::mosaic(reference.view(), &phase))?
        };

        let reconstruction = {
            let _span = tracing::info_span!("debayer").entered();
            timings.time("debayer", || debayer(mosaic.view(), &phase))?
        };

        self.write_rgb(sink, Artifact::Reconstruction, reconstruction.view(), 1, timings)?;

        if self.config.write_mosaic {
            self.write_gray(sink, Artifact::MosaicMono, mosaic.view(), timings)?;
            let visual = bayer::mosaic_color(reference.view(), &phase)?;
            self.write_rgb(sink, Artifact::Mosaic, visual.view(), self.config.upscale, timings)?;
        }

        if self.config.write_difference {
            let difference = difference_image(reference.view(), reconstruction.view())?;
            self.write_rgb(sink, Artifact::Difference, difference.view(), self.config.upscale, timings)?;
        }

        let peak = <T as Bounded>::max_value().as_f64();
        Ok(timings.time("metrics", || {
            MetricsReport::compute(reference.view(), reconstruction.view(), peak)
        })?)
    }

    #[instrument(skip(self, input_data, sink), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], sink: &mut dyn ArtifactSink) -> Result<SimulationReport> {
        info!("Starting Bayer simulation");
        let mut timings = PipelineTimings::new();

        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            timings.time("decode", || self.reader.read_image(input_data))?
        };

        let (height, width) = image.dim();
        validate_dimensions(&self.config, width, height)?;

        let metrics = match &image {
            ColorImage::Rgb8(reference) => self.simulate(reference, sink, &mut timings)?,
            ColorImage::Rgb16(reference) => self.simulate(reference, sink, &mut timings)?,
        };

        info!(
            width,
            height,
            mse = metrics.mse,
            psnr = metrics.psnr,
            "Simulation complete"
        );

        Ok(SimulationReport {
            width,
            height,
            phase: self.config.phase,
            bits_per_sample: image.bits_per_sample(),
            metrics,
            timings,
        })
    }

    #[instrument(skip(self, input_path, output_dir))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<SimulationReport> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Simulating file"
        );

        let input_data = read_input_file(input_path)?;

        let mut sink = DirectorySink::new(output_dir)?;
        self.convert(&input_data, &mut sink)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
