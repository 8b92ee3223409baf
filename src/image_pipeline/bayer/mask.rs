use ndarray::Array2;
use tracing::debug;

use crate::image_pipeline::bayer::phase::{Channel, Phase};
use crate::image_pipeline::common::BayerError;

/// Per-channel occupancy masks for a frame.
///
/// For any [`Phase`] the three masks partition the frame: every position is
/// true in exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMasks {
    pub red: Array2<bool>,
    pub green: Array2<bool>,
    pub blue: Array2<bool>,
}

impl ColorMasks {
    pub fn get(&self, channel: Channel) -> &Array2<bool> {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.red.dim()
    }
}

/// Checks that a `height x width` frame is covered exactly by 2x2 tiles.
pub fn validate_tiling(height: usize, width: usize) -> Result<(), BayerError> {
    if height % 2 != 0 || width % 2 != 0 {
        return Err(BayerError::ShapeMismatch { height, width });
    }
    Ok(())
}

/// Builds the red, green and blue sampling masks for a frame of `shape` (rows, cols).
pub fn bayer_masks(shape: (usize, usize), phase: &Phase) -> Result<ColorMasks, BayerError> {
    let (height, width) = shape;
    validate_tiling(height, width)?;
    debug!("Building {} masks for {}x{} frame", phase, height, width);

    let tiled = |channel: Channel| {
        let template = phase.template(channel);
        Array2::from_shape_fn(shape, |(row, col)| template[row % 2][col % 2])
    };

    Ok(ColorMasks {
        red: tiled(Channel::Red),
        green: tiled(Channel::Green),
        blue: tiled(Channel::Blue),
    })
}
