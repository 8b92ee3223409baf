//! Image processing pipeline module
//!
//! The Bayer core lives in [`bayer`] (phase, masks, sampling), [`debayer`]
//! (nearest-neighbour reconstruction) and [`array_ops`] (shift with edge
//! fill). [`metrics`] compares reconstructions against references, while
//! [`tiff`], [`raw`] and [`conversions`] wire the core to files.

pub mod array_ops;
pub mod bayer;
pub mod common;
pub mod conversions;
pub mod debayer;
pub mod metrics;
pub mod raw;
pub mod tiff;

pub use common::{
    BayerError,
    ConversionError,
    Result,
    Sample,
};

pub use bayer::{
    bayer_masks,
    mosaic,
    mosaic_color,
    Channel,
    ColorMasks,
    Phase,
};

pub use debayer::{
    debayer,
    NearestNeighborDebayer,
};

pub use array_ops::{
    shift_2d,
    shift_2d_with,
    upscale_nearest,
    EdgeFill,
};

pub use metrics::MetricsReport;

pub use raw::{
    RawImageReader,
    RawLoaderReader,
    RawMosaic,
};

pub use tiff::{
    ColorImage,
    ConversionConfig,
    ConversionConfigBuilder,
    StandardTiffWriter,
    TiffCompression,
    TiffImageReader,
    TiffWriter,
};

pub use conversions::{
    RawToTiffPipeline,
    SimulationPipeline,
    SimulationReport,
};
