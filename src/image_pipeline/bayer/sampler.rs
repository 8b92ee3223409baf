use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};
use tracing::debug;

use crate::image_pipeline::bayer::mask::bayer_masks;
use crate::image_pipeline::bayer::phase::{Channel, Phase};
use crate::image_pipeline::common::{BayerError, Sample};

fn check_color_image<T>(image: &ArrayView3<'_, T>) -> Result<(usize, usize), BayerError> {
    let (height, width, channels) = image.dim();
    if channels != 3 {
        return Err(BayerError::InvalidInput(format!(
            "expected a 3-channel image, got {channels} channels"
        )));
    }
    Ok((height, width))
}

/// Single-channel mosaic a sensor with `phase` would record for `image`.
///
/// Each position holds the value of the one channel sampled there.
pub fn mosaic<T: Sample>(image: ArrayView3<'_, T>, phase: &Phase) -> Result<Array2<T>, BayerError> {
    let (height, width) = check_color_image(&image)?;
    let masks = bayer_masks((height, width), phase)?;
    debug!("Sampling {}x{} image through {} filter", height, width, phase);

    let mut mosaic = Array2::<T>::zeros((height, width));
    for channel in Channel::ALL {
        let plane = image.index_axis(Axis(2), channel.index());
        Zip::from(&mut mosaic)
            .and(masks.get(channel))
            .and(plane)
            .for_each(|out, &sampled, &value| {
                if sampled {
                    *out = *out + value;
                }
            });
    }
    Ok(mosaic)
}

/// Three-channel view of the mosaic: sampled values kept in their own plane, zero elsewhere.
pub fn mosaic_color<T: Sample>(
    image: ArrayView3<'_, T>,
    phase: &Phase,
) -> Result<Array3<T>, BayerError> {
    let (height, width) = check_color_image(&image)?;
    let masks = bayer_masks((height, width), phase)?;

    let mut visual = Array3::<T>::zeros((height, width, 3));
    for channel in Channel::ALL {
        let plane = image.index_axis(Axis(2), channel.index());
        Zip::from(visual.index_axis_mut(Axis(2), channel.index()))
            .and(masks.get(channel))
            .and(plane)
            .for_each(|out, &sampled, &value| {
                *out = if sampled { value } else { T::zero() };
            });
    }
    Ok(visual)
}
