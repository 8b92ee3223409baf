//! Translation of 2-D arrays with edge fill

use ndarray::{Array2, ArrayView2, Axis};
use num_traits::Zero;

use crate::image_pipeline::common::BayerError;

/// How rows or columns vacated by a shift are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFill {
    Zero,
    /// Tile a stripe of this many rows (or columns) taken from the edge the
    /// data moved away from.
    Replicate(usize),
}

impl From<usize> for EdgeFill {
    /// A stride of 0 selects zero fill.
    fn from(stride: usize) -> Self {
        match stride {
            0 => Self::Zero,
            stride => Self::Replicate(stride),
        }
    }
}

/// Source index along an axis of length `len` for output `index` after shifting by `shift`.
///
/// `None` means the position is filled with zero.
fn source_index(index: usize, shift: isize, len: usize, fill: EdgeFill) -> Option<usize> {
    let magnitude = shift.unsigned_abs();
    if shift > 0 && index < magnitude {
        match fill {
            EdgeFill::Zero => None,
            EdgeFill::Replicate(stride) => {
                // stripe = leading rows, tiled and aligned so its end meets the shifted data
                let stripe = stride.min(len);
                let tiled = magnitude.div_ceil(stride) * stripe;
                Some((tiled - magnitude + index) % stripe)
            }
        }
    } else if shift < 0 && index >= len - magnitude {
        match fill {
            EdgeFill::Zero => None,
            EdgeFill::Replicate(stride) => {
                let stripe = stride.min(len);
                Some(len - stripe + (index - (len - magnitude)) % stripe)
            }
        }
    } else {
        Some(index.wrapping_add_signed(-shift))
    }
}

fn shift_axis<T: Clone + Zero>(
    array: ArrayView2<'_, T>,
    axis: Axis,
    shift: isize,
    fill: EdgeFill,
) -> Array2<T> {
    let len = array.len_of(axis);
    let sources: Vec<Option<usize>> = (0..len)
        .map(|index| source_index(index, shift, len, fill))
        .collect();

    Array2::from_shape_fn(array.dim(), |(row, col)| {
        let (index, other) = if axis == Axis(0) { (row, col) } else { (col, row) };
        match sources[index] {
            Some(source) if axis == Axis(0) => array[[source, other]].clone(),
            Some(source) => array[[other, source]].clone(),
            None => T::zero(),
        }
    })
}

/// Shifts `array` down by `row_shift` and right by `col_shift` (negative values
/// shift up and left).
///
/// Rows are shifted first, then columns of the result. A `stride` of 0 fills
/// vacated positions with zero; otherwise they are filled by tiling a
/// `stride`-wide stripe from the leading edge (positive shift) or trailing
/// edge (negative shift), so a 2-periodic Bayer layout survives odd shifts
/// with `stride == 2`.
///
/// Fails with [`BayerError::OutOfRange`] when a non-zero shift is not smaller
/// than the corresponding axis.
pub fn shift_2d<T: Clone + Zero>(
    array: ArrayView2<'_, T>,
    row_shift: isize,
    col_shift: isize,
    stride: usize,
) -> Result<Array2<T>, BayerError> {
    shift_2d_with(array, row_shift, col_shift, EdgeFill::from(stride))
}

/// [`shift_2d`] with an explicit [`EdgeFill`] policy.
pub fn shift_2d_with<T: Clone + Zero>(
    array: ArrayView2<'_, T>,
    row_shift: isize,
    col_shift: isize,
    fill: EdgeFill,
) -> Result<Array2<T>, BayerError> {
    let (rows, cols) = array.dim();
    for (axis, shift, len) in [("rows", row_shift, rows), ("columns", col_shift, cols)] {
        if shift != 0 && shift.unsigned_abs() >= len {
            return Err(BayerError::OutOfRange { axis, shift, len });
        }
    }

    let fill = match fill {
        EdgeFill::Replicate(0) => EdgeFill::Zero,
        fill => fill,
    };
    let shifted_rows = if row_shift == 0 {
        array.to_owned()
    } else {
        shift_axis(array, Axis(0), row_shift, fill)
    };
    if col_shift == 0 {
        return Ok(shifted_rows);
    }
    Ok(shift_axis(shifted_rows.view(), Axis(1), col_shift, fill))
}
