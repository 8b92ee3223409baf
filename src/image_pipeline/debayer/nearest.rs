//! Nearest-neighbour demosaicing.
//!
//! The mosaic is padded by two positions on each side (see [`BorderedFrame`]),
//! every position is classified by the channel it samples, and the two missing
//! channels are filled with truncating averages of the nearest samples of
//! that channel:
//!
//! | channel | red sample    | green, red row | green, blue row | blue sample   |
//! |---------|---------------|----------------|-----------------|---------------|
//! | red     | sampled       | (left+right)/2 | (up+down)/2     | diagonals/4   |
//! | green   | orthogonal/4  | sampled        | sampled         | orthogonal/4  |
//! | blue    | diagonals/4   | (up+down)/2    | (left+right)/2  | sampled       |

use ndarray::{Array3, ArrayView2, ArrayViewD, Axis, Ix2, Zip};
use tracing::{debug, info};

use crate::image_pipeline::bayer::{validate_tiling, Phase};
use crate::image_pipeline::common::{BayerError, Sample};
use crate::image_pipeline::debayer::border::{BorderedFrame, Direction, BORDER};
use crate::image_pipeline::debayer::classes::{PositionClass, PositionClasses};

const LEFT_RIGHT: [Direction; 2] = [Direction::Left, Direction::Right];
const UP_DOWN: [Direction; 2] = [Direction::Up, Direction::Down];

/// RGB estimate at a classified position of the bordered frame.
#[inline]
fn reconstruct(frame: &BorderedFrame, class: PositionClass, row: usize, col: usize) -> [u32; 3] {
    let sampled = frame.value(row, col);
    match class {
        PositionClass::Red => [
            sampled,
            frame.mean(row, col, &Direction::ORTHOGONAL),
            frame.mean(row, col, &Direction::DIAGONAL),
        ],
        PositionClass::GreenOnRedRow => [
            frame.mean(row, col, &LEFT_RIGHT),
            sampled,
            frame.mean(row, col, &UP_DOWN),
        ],
        PositionClass::GreenOnBlueRow => [
            frame.mean(row, col, &UP_DOWN),
            sampled,
            frame.mean(row, col, &LEFT_RIGHT),
        ],
        PositionClass::Blue => [
            frame.mean(row, col, &Direction::DIAGONAL),
            frame.mean(row, col, &Direction::ORTHOGONAL),
            sampled,
        ],
    }
}

/// Reconstructs an `(H, W, 3)` image from an `(H, W)` mosaic captured with `phase`.
///
/// Values sampled directly by the sensor are copied through unchanged.
pub fn debayer<T: Sample>(mosaic: ArrayView2<'_, T>, phase: &Phase) -> Result<Array3<T>, BayerError> {
    let (height, width) = mosaic.dim();
    if height == 0 || width == 0 {
        return Err(BayerError::InvalidInput(format!(
            "cannot demosaic an empty {height}x{width} frame"
        )));
    }
    validate_tiling(height, width)?;
    debug!("Demosaicing {}x{} {} mosaic", height, width, phase);

    let frame = BorderedFrame::new(mosaic)?;
    let classes = PositionClasses::new(frame.dim(), phase)?;

    let mut output = Array3::<T>::zeros((height, width, 3));
    Zip::indexed(output.lanes_mut(Axis(2))).for_each(|(row, col), mut pixel| {
        let (row, col) = (row + BORDER, col + BORDER);
        if let Some(class) = classes.at(row, col) {
            let rgb = reconstruct(&frame, class, row, col);
            for (out, value) in pixel.iter_mut().zip(rgb) {
                *out = T::from_sum(value);
            }
        }
    });
    Ok(output)
}

/// [`debayer`] for a mosaic whose rank is only known at runtime.
pub fn debayer_dyn<T: Sample>(mosaic: ArrayViewD<'_, T>, phase: &Phase) -> Result<Array3<T>, BayerError> {
    let ndim = mosaic.ndim();
    let mosaic = mosaic.into_dimensionality::<Ix2>().map_err(|_| {
        BayerError::InvalidInput(format!("expected a 2-D mosaic, got {ndim} dimensions"))
    })?;
    debayer(mosaic, phase)
}

/// Nearest-neighbour demosaicer bound to a sensor phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborDebayer {
    phase: Phase,
}

impl NearestNeighborDebayer {
    pub fn new(phase: Phase) -> Self {
        Self { phase }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn process<T: Sample>(&self, mosaic: ArrayView2<'_, T>) -> Result<Array3<T>, BayerError> {
        let (height, width) = mosaic.dim();
        info!("Starting nearest-neighbour debayering for image {}x{}", width, height);
        debayer(mosaic, &self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::bayer::mosaic;
    use ndarray::{arr2, Array2, IxDyn};

    const PHASES: [Phase; 4] = [Phase::RGGB, Phase::BGGR, Phase::GRBG, Phase::GBRG];

    fn scrambled_mosaic(height: usize, width: usize) -> Array2<u8> {
        Array2::from_shape_fn((height, width), |(r, c)| ((r * 37 + c * 101 + r * c * 13) % 251) as u8)
    }

    #[test]
    fn output_shape_adds_three_channels() {
        let mono = scrambled_mosaic(6, 10);
        let rgb = debayer(mono.view(), &Phase::RGGB).unwrap();
        assert_eq!(rgb.dim(), (6, 10, 3));
    }

    #[test]
    fn sampled_values_are_preserved() {
        let mono = scrambled_mosaic(8, 12);
        for phase in PHASES {
            let rgb = debayer(mono.view(), &phase).unwrap();
            for ((r, c), &value) in mono.indexed_iter() {
                let channel = phase.channel_at(r, c).index();
                assert_eq!(rgb[[r, c, channel]], value, "phase {phase} at ({r}, {c})");
            }
        }
    }

    #[test]
    fn constant_mosaic_is_stable_to_the_edges() {
        for phase in PHASES {
            let mono = Array2::from_elem((6, 4), 173u16);
            let rgb = debayer(mono.view(), &phase).unwrap();
            assert!(rgb.iter().all(|&v| v == 173), "phase {phase}");
        }
    }

    #[test]
    fn flat_color_round_trips_through_mosaic() {
        let image = Array3::from_shape_fn((8, 8, 3), |(_, _, ch)| [200u8, 90, 15][ch]);
        for phase in PHASES {
            let mono = mosaic(image.view(), &phase).unwrap();
            let rgb = debayer(mono.view(), &phase).unwrap();
            assert_eq!(rgb, image, "phase {phase}");
        }
    }

    #[test]
    fn averages_truncate_and_borders_duplicate() {
        // rggb: row 0 is r g r g, row 1 is g b g b
        let mono = arr2(&[
            [0u8, 0, 0, 0],
            [3, 5, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let rgb = debayer(mono.view(), &Phase::RGGB).unwrap();

        // red at (0, 0): up/down pad rows repeat mosaic row 1, so green = (3 + 3 + 0 + 0) / 4
        assert_eq!(rgb.slice(ndarray::s![0, 0, ..]).to_vec(), vec![0, 1, 5]);
        // green on blue row at (1, 0): blue = (5 + 5) / 2 via the duplicated left column
        assert_eq!(rgb.slice(ndarray::s![1, 0, ..]).to_vec(), vec![0, 3, 5]);
        // green on blue row at (1, 2): blue = (5 + 2) / 2 truncated
        assert_eq!(rgb.slice(ndarray::s![1, 2, ..]).to_vec(), vec![0, 0, 3]);
        // blue at (1, 1): green = (0 + 0 + 3 + 0) / 4 truncated
        assert_eq!(rgb.slice(ndarray::s![1, 1, ..]).to_vec(), vec![0, 0, 5]);
    }

    #[test]
    fn interior_matches_neighbour_rules() {
        let mono = scrambled_mosaic(8, 8);
        let rgb = debayer(mono.view(), &Phase::GRBG).unwrap();
        let v = |r: usize, c: usize| u32::from(mono[[r, c]]);

        // grbg: (2, 2) green on red row, (3, 3) green on blue row, (2, 3) red, (3, 2) blue
        assert_eq!(u32::from(rgb[[2, 2, 0]]), (v(2, 1) + v(2, 3)) / 2);
        assert_eq!(u32::from(rgb[[2, 2, 2]]), (v(1, 2) + v(3, 2)) / 2);
        assert_eq!(u32::from(rgb[[3, 3, 0]]), (v(2, 3) + v(4, 3)) / 2);
        assert_eq!(u32::from(rgb[[3, 3, 2]]), (v(3, 2) + v(3, 4)) / 2);
        assert_eq!(u32::from(rgb[[2, 3, 1]]), (v(1, 3) + v(3, 3) + v(2, 2) + v(2, 4)) / 4);
        assert_eq!(u32::from(rgb[[2, 3, 2]]), (v(1, 2) + v(1, 4) + v(3, 2) + v(3, 4)) / 4);
        assert_eq!(u32::from(rgb[[3, 2, 0]]), (v(2, 1) + v(2, 3) + v(4, 1) + v(4, 3)) / 4);
    }

    #[test]
    fn sixteen_bit_sums_do_not_overflow() {
        let mono = Array2::from_elem((4, 4), u16::MAX);
        let rgb = debayer(mono.view(), &Phase::BGGR).unwrap();
        assert!(rgb.iter().all(|&v| v == u16::MAX));
    }

    #[test]
    fn input_is_left_untouched() {
        let mono = scrambled_mosaic(4, 6);
        let before = mono.clone();
        let _ = debayer(mono.view(), &Phase::RGGB).unwrap();
        assert_eq!(mono, before);
    }

    #[test]
    fn rejects_odd_and_empty_frames() {
        let odd = Array2::<u8>::zeros((4, 5));
        assert_eq!(
            debayer(odd.view(), &Phase::RGGB).unwrap_err(),
            BayerError::ShapeMismatch { height: 4, width: 5 }
        );
        let empty = Array2::<u8>::zeros((0, 4));
        assert!(matches!(
            debayer(empty.view(), &Phase::RGGB),
            Err(BayerError::InvalidInput(_))
        ));
    }

    #[test]
    fn dynamic_rank_is_checked() {
        let cube = ndarray::ArrayD::<u8>::zeros(IxDyn(&[4, 4, 3]));
        assert!(matches!(
            debayer_dyn(cube.view(), &Phase::RGGB),
            Err(BayerError::InvalidInput(_))
        ));
        let flat = ndarray::ArrayD::<u8>::zeros(IxDyn(&[4, 4]));
        assert_eq!(debayer_dyn(flat.view(), &Phase::RGGB).unwrap().dim(), (4, 4, 3));
    }

    #[test]
    fn struct_wrapper_uses_its_phase() {
        let mono = scrambled_mosaic(4, 4);
        let debayer_bggr = NearestNeighborDebayer::new(Phase::BGGR);
        assert_eq!(debayer_bggr.phase(), Phase::BGGR);
        assert_eq!(
            debayer_bggr.process(mono.view()).unwrap(),
            debayer(mono.view(), &Phase::BGGR).unwrap()
        );
    }
}
