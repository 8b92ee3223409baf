//! Border extension and neighbour lookup on padded mosaics

use ndarray::{s, Array2, ArrayView2};

use crate::image_pipeline::common::{BayerError, Sample};

/// Padding added on every side of the mosaic.
pub const BORDER: usize = 2;

/// Compass direction of a neighbouring sensor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
    pub const DIAGONAL: [Direction; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// `(row, col)` offset of the neighbour.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }
}

/// Maps an index on a bordered axis back onto the original axis of length `len`.
///
/// The two leading and two trailing padding positions repeat the two outermost
/// original positions in order, which keeps the 2x2 phase aligned.
#[inline]
fn source_index(index: usize, len: usize) -> usize {
    if index < BORDER {
        index
    } else if index < len + BORDER {
        index - BORDER
    } else {
        index - 2 * BORDER
    }
}

/// Mosaic padded by [`BORDER`] positions on every side, widened to `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderedFrame {
    data: Array2<u32>,
}

impl BorderedFrame {
    /// Pads `mosaic` by duplicating its two outermost rows and columns.
    ///
    /// Fails with [`BayerError::InvalidInput`] when either axis is shorter than [`BORDER`].
    pub fn new<T: Sample>(mosaic: ArrayView2<'_, T>) -> Result<Self, BayerError> {
        let (height, width) = mosaic.dim();
        if height < BORDER || width < BORDER {
            return Err(BayerError::InvalidInput(format!(
                "cannot border a {height}x{width} frame, both axes need at least {BORDER} positions"
            )));
        }
        let data = Array2::from_shape_fn(
            (height + 2 * BORDER, width + 2 * BORDER),
            |(row, col)| mosaic[[source_index(row, height), source_index(col, width)]].widen(),
        );
        Ok(Self { data })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// The original mosaic region.
    pub fn interior(&self) -> ArrayView2<'_, u32> {
        let (height, width) = self.data.dim();
        self.data.slice(s![BORDER..height - BORDER, BORDER..width - BORDER])
    }

    #[inline]
    pub fn value(&self, row: usize, col: usize) -> u32 {
        self.data[[row, col]]
    }

    /// Value of the neighbour of `(row, col)` in `direction`.
    ///
    /// Panics when the neighbour falls outside the frame; there is no wraparound.
    #[inline]
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> u32 {
        let (dr, dc) = direction.offset();
        self.data[[row.wrapping_add_signed(dr), col.wrapping_add_signed(dc)]]
    }

    /// Truncating mean of the neighbours of `(row, col)` in `directions`.
    #[inline]
    pub fn mean(&self, row: usize, col: usize, directions: &[Direction]) -> u32 {
        let sum: u32 = directions
            .iter()
            .map(|&direction| self.neighbor(row, col, direction))
            .sum();
        sum / directions.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn duplicates_outer_rows_and_columns() {
        let mosaic = arr2(&[[1u8, 2, 3, 4], [5, 6, 7, 8]]);
        let bordered = BorderedFrame::new(mosaic.view()).unwrap();
        assert_eq!(bordered.dim(), (6, 8));

        let expected = arr2(&[
            [1u32, 2, 1, 2, 3, 4, 3, 4],
            [5, 6, 5, 6, 7, 8, 7, 8],
            [1, 2, 1, 2, 3, 4, 3, 4],
            [5, 6, 5, 6, 7, 8, 7, 8],
            [1, 2, 1, 2, 3, 4, 3, 4],
            [5, 6, 5, 6, 7, 8, 7, 8],
        ]);
        assert_eq!(bordered.data, expected);
    }

    #[test]
    fn interior_is_the_original_mosaic() {
        let mosaic = Array2::from_shape_fn((6, 4), |(r, c)| (r * 4 + c) as u16);
        let bordered = BorderedFrame::new(mosaic.view()).unwrap();
        assert_eq!(bordered.interior(), mosaic.mapv(u32::from));
    }

    #[test]
    fn neighbours_follow_compass_offsets() {
        let mosaic = Array2::from_shape_fn((4, 4), |(r, c)| (r * 10 + c) as u8);
        let bordered = BorderedFrame::new(mosaic.view()).unwrap();
        // bordered (3, 3) is mosaic (1, 1)
        assert_eq!(bordered.value(3, 3), 11);
        assert_eq!(bordered.neighbor(3, 3, Direction::Up), 1);
        assert_eq!(bordered.neighbor(3, 3, Direction::Down), 21);
        assert_eq!(bordered.neighbor(3, 3, Direction::Left), 10);
        assert_eq!(bordered.neighbor(3, 3, Direction::Right), 12);
        assert_eq!(bordered.neighbor(3, 3, Direction::UpLeft), 0);
        assert_eq!(bordered.neighbor(3, 3, Direction::DownRight), 22);
    }

    #[test]
    fn mean_truncates() {
        let mosaic = arr2(&[[0u8, 1, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let bordered = BorderedFrame::new(mosaic.view()).unwrap();
        // neighbours of mosaic (1, 1): up 1, left 2, others 0
        assert_eq!(bordered.mean(3, 3, &Direction::ORTHOGONAL), 0);
        assert_eq!(bordered.mean(3, 3, &[Direction::Up, Direction::Left]), 1);
    }

    #[test]
    fn frames_thinner_than_border_are_rejected() {
        for shape in [(1, 4), (4, 1), (0, 0)] {
            let mosaic = Array2::<u16>::zeros(shape);
            assert!(matches!(
                BorderedFrame::new(mosaic.view()),
                Err(BayerError::InvalidInput(_))
            ));
        }
    }

    #[test]
    #[should_panic]
    fn neighbour_outside_frame_panics() {
        let mosaic = Array2::<u8>::zeros((2, 2));
        let bordered = BorderedFrame::new(mosaic.view()).unwrap();
        bordered.neighbor(0, 0, Direction::Up);
    }
}
