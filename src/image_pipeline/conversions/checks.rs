//! Input handling shared by the pipelines

use std::path::Path;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::ConversionConfig;

/// Rejects empty frames unless `config.validate_dimensions` is off.
pub(crate) fn validate_dimensions(config: &ConversionConfig, width: usize, height: usize) -> Result<()> {
    let _span = tracing::info_span!("validate_dimensions", width, height).entered();
    if !config.validate_dimensions {
        return Ok(());
    }

    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }

    Ok(())
}

pub(crate) fn read_input_file(input_path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(input_path)
        .map_err(|e| ConversionError::InputReadError(format!("{}: {}", input_path.display(), e)))
}
