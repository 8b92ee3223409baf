//! Reconstruction classes of positions on a bordered mosaic

use ndarray::Array2;

use crate::image_pipeline::bayer::{bayer_masks, Phase};
use crate::image_pipeline::common::BayerError;

/// How the missing channels of a position are reconstructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionClass {
    /// Red sample.
    Red,
    /// Green sample on the tile row that carries red.
    GreenOnRedRow,
    /// Green sample on the tile row that carries blue.
    GreenOnBlueRow,
    /// Blue sample.
    Blue,
}

impl PositionClass {
    pub fn is_green(self) -> bool {
        matches!(self, Self::GreenOnRedRow | Self::GreenOnBlueRow)
    }
}

/// Class of every position of a frame, `None` on the outermost ring.
///
/// Ring positions are left unclassified so that every classified position has
/// all eight neighbours inside the frame.
#[derive(Debug, Clone)]
pub struct PositionClasses {
    classes: Array2<Option<PositionClass>>,
}

impl PositionClasses {
    pub fn new(shape: (usize, usize), phase: &Phase) -> Result<Self, BayerError> {
        let masks = bayer_masks(shape, phase)?;
        let (height, width) = shape;
        let red_row = phase.red_row();

        let classes = Array2::from_shape_fn(shape, |(row, col)| {
            if row == 0 || col == 0 || row + 1 == height || col + 1 == width {
                None
            } else if masks.red[[row, col]] {
                Some(PositionClass::Red)
            } else if masks.blue[[row, col]] {
                Some(PositionClass::Blue)
            } else if row % 2 == red_row {
                Some(PositionClass::GreenOnRedRow)
            } else {
                Some(PositionClass::GreenOnBlueRow)
            }
        });
        Ok(Self { classes })
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Option<PositionClass> {
        self.classes[[row, col]]
    }

    /// Boolean mask of the classified positions that satisfy `predicate`.
    pub fn mask(&self, predicate: impl Fn(PositionClass) -> bool) -> Array2<bool> {
        self.classes.mapv(|class| class.is_some_and(&predicate))
    }
}
