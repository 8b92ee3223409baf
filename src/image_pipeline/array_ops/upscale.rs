use ndarray::{Array3, ArrayView3};

use crate::image_pipeline::common::BayerError;

/// Integer nearest-neighbour enlargement of an `(H, W, C)` image by `factor`.
pub fn upscale_nearest<T: Clone>(image: ArrayView3<'_, T>, factor: usize) -> Result<Array3<T>, BayerError> {
    if factor == 0 {
        return Err(BayerError::InvalidInput("upscale factor must be at least 1".to_string()));
    }
    if factor == 1 {
        return Ok(image.to_owned());
    }
    let (height, width, channels) = image.dim();
    Ok(Array3::from_shape_fn(
        (height * factor, width * factor, channels),
        |(row, col, ch)| image[[row / factor, col / factor, ch]].clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;

    #[test]
    fn each_pixel_becomes_a_block() {
        let image = Array3::from_shape_fn((2, 2, 1), |(r, c, _)| (r * 2 + c) as u8);
        let big = upscale_nearest(image.view(), 3).unwrap();
        assert_eq!(big.dim(), (6, 6, 1));
        assert_eq!(big[[0, 0, 0]], 0);
        assert_eq!(big[[2, 5, 0]], 1);
        assert_eq!(big[[5, 0, 0]], 2);
        assert_eq!(big[[3, 3, 0]], 3);
    }

    #[test]
    fn works_on_mono_through_an_inserted_axis() {
        let mono = ndarray::arr2(&[[1u16, 2], [3, 4]]);
        let big = upscale_nearest(mono.view().insert_axis(Axis(2)), 2)
            .unwrap()
            .remove_axis(Axis(2));
        assert_eq!(big.row(1).to_vec(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn factor_one_copies_and_zero_fails() {
        let image = Array3::<u8>::ones((2, 4, 3));
        assert_eq!(upscale_nearest(image.view(), 1).unwrap(), image);
        assert!(upscale_nearest(image.view(), 0).is_err());
    }
}
