use std::path::PathBuf;

use anyhow::Context;
use bayer_sim::image_pipeline::{
    ConversionConfig, Phase, RawToTiffPipeline, SimulationPipeline, TiffCompression,
};
use bayer_sim::logger;
use clap::{Parser, Subcommand, ValueEnum};

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bayer-sim", about = "Simulate a Bayer sensor and demosaic the result")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample a color TIFF through a Bayer filter, demosaic it and report fidelity
    Simulate {
        input: PathBuf,
        output_dir: PathBuf,
        /// 2x2 filter layout, e.g. rggb, bggr, grbg, gbrg
        #[arg(long, default_value = "rggb")]
        phase: Phase,
        /// Nearest-neighbour scale for the mosaic and difference previews
        #[arg(long, default_value_t = 1)]
        upscale: usize,
        #[arg(long, value_enum, default_value_t = Compression::None)]
        compression: Compression,
        /// Skip the false-color mosaic preview
        #[arg(long)]
        no_mosaic: bool,
        /// Skip the difference image
        #[arg(long)]
        no_difference: bool,
    },
    /// Demosaic a camera RAW file into a 16-bit RGB TIFF
    Raw {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Compression::None)]
        compression: Compression,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

impl From<Compression> for TiffCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::Deflate => TiffCompression::DeflateBalanced,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            input,
            output_dir,
            phase,
            upscale,
            compression,
            no_mosaic,
            no_difference,
        } => {
            let config = ConversionConfig::builder()
                .phase(phase)
                .upscale(upscale)
                .compression(compression.into())
                .write_mosaic(!no_mosaic)
                .write_difference(!no_difference)
                .build();
            let pipeline = SimulationPipeline::new(config);

            let report = pipeline
                .convert_file(&input, &output_dir)
                .with_context(|| format!("simulating {}", input.display()))?;

            info!("Phase: {}", report.phase);
            info!("MSE:  {:.4}", report.metrics.mse);
            info!("RMSE: {:.4}", report.metrics.rmse);
            info!("PSNR: {:.4} dB", report.metrics.psnr);
            info!("SNR:  {:.4} dB", report.metrics.snr);
            report.timings.log_summary();
        }
        Command::Raw {
            input,
            output,
            compression,
        } => {
            let config = ConversionConfig::builder()
                .compression(compression.into())
                .build();
            RawToTiffPipeline::new(config)
                .convert_file(&input, &output)
                .with_context(|| format!("converting {}", input.display()))?;
            info!("Conversion successful!");
        }
    }

    Ok(())
}
