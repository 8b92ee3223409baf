//! Image fidelity metrics
//!
//! Scalar comparisons of a reference grid against a query grid of the same
//! shape. PSNR and SNR are reported in decibels and are infinite for
//! identical inputs.

use ndarray::{Array3, ArrayView, ArrayView3, Dimension, Zip};

use crate::image_pipeline::common::{BayerError, Sample};

fn check_shapes<T, D: Dimension>(
    reference: &ArrayView<'_, T, D>,
    query: &ArrayView<'_, T, D>,
) -> Result<(), BayerError> {
    if reference.shape() != query.shape() {
        return Err(BayerError::InvalidInput(format!(
            "reference shape {:?} does not match query shape {:?}",
            reference.shape(),
            query.shape()
        )));
    }
    if reference.is_empty() {
        return Err(BayerError::InvalidInput("cannot compare empty grids".to_string()));
    }
    Ok(())
}

/// Mean squared error.
pub fn mse<T: Sample, D: Dimension>(
    reference: ArrayView<'_, T, D>,
    query: ArrayView<'_, T, D>,
) -> Result<f64, BayerError> {
    check_shapes(&reference, &query)?;
    let mut sum = 0.0;
    Zip::from(&reference).and(&query).for_each(|&r, &q| {
        let diff = r.as_f64() - q.as_f64();
        sum += diff * diff;
    });
    Ok(sum / reference.len() as f64)
}

/// Root mean squared error.
pub fn rmse<T: Sample, D: Dimension>(
    reference: ArrayView<'_, T, D>,
    query: ArrayView<'_, T, D>,
) -> Result<f64, BayerError> {
    mse(reference, query).map(f64::sqrt)
}

/// Peak signal-to-noise ratio against a peak value of `normalization` (255 for 8-bit data).
pub fn psnr<T: Sample, D: Dimension>(
    reference: ArrayView<'_, T, D>,
    query: ArrayView<'_, T, D>,
    normalization: f64,
) -> Result<f64, BayerError> {
    let error = mse(reference, query)?;
    if error == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (normalization * normalization / error).log10())
}

/// Signal-to-noise ratio: mean squared reference signal over the MSE.
pub fn snr<T: Sample, D: Dimension>(
    reference: ArrayView<'_, T, D>,
    query: ArrayView<'_, T, D>,
) -> Result<f64, BayerError> {
    let error = mse(reference.view(), query)?;
    if error == 0.0 {
        return Ok(f64::INFINITY);
    }
    let signal = reference.iter().map(|&v| v.as_f64() * v.as_f64()).sum::<f64>() / reference.len() as f64;
    Ok(10.0 * (signal / error).log10())
}

/// All fidelity metrics for one comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsReport {
    pub mse: f64,
    pub rmse: f64,
    pub psnr: f64,
    pub snr: f64,
}

impl MetricsReport {
    pub fn compute<T: Sample, D: Dimension>(
        reference: ArrayView<'_, T, D>,
        query: ArrayView<'_, T, D>,
        normalization: f64,
    ) -> Result<Self, BayerError> {
        Ok(Self {
            mse: mse(reference.view(), query.view())?,
            rmse: rmse(reference.view(), query.view())?,
            psnr: psnr(reference.view(), query.view(), normalization)?,
            snr: snr(reference, query)?,
        })
    }
}

/// Visual difference image: `reference - query + 127`, clamped to `0..=255`.
pub fn difference_image<T: Sample>(
    reference: ArrayView3<'_, T>,
    query: ArrayView3<'_, T>,
) -> Result<Array3<u8>, BayerError> {
    check_shapes(&reference, &query)?;
    let mut diff = Array3::<u8>::zeros(reference.dim());
    Zip::from(&mut diff)
        .and(&reference)
        .and(&query)
        .for_each(|out, &r, &q| {
            let value = i64::from(r.widen()) - i64::from(q.widen()) + 127;
            *out = value.clamp(0, 255) as u8;
        });
    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn identical_grids_have_zero_error() {
        let reference = Array2::from_shape_fn((4, 4), |(r, c)| (r * 16 + c) as u8);
        assert_eq!(mse(reference.view(), reference.view()).unwrap(), 0.0);
        assert_eq!(rmse(reference.view(), reference.view()).unwrap(), 0.0);
        assert_eq!(psnr(reference.view(), reference.view(), 255.0).unwrap(), f64::INFINITY);
        assert_eq!(snr(reference.view(), reference.view()).unwrap(), f64::INFINITY);
    }

    #[test]
    fn known_error_values() {
        let reference = arr1(&[10u8, 20, 30, 40]);
        let query = arr1(&[12u8, 18, 30, 40]);
        // squared errors 4, 4, 0, 0
        assert_eq!(mse(reference.view(), query.view()).unwrap(), 2.0);
        assert!((rmse(reference.view(), query.view()).unwrap() - 2f64.sqrt()).abs() < 1e-12);

        let expected_psnr = 10.0 * (255.0f64 * 255.0 / 2.0).log10();
        assert!((psnr(reference.view(), query.view(), 255.0).unwrap() - expected_psnr).abs() < 1e-9);

        let signal = (100.0 + 400.0 + 900.0 + 1600.0) / 4.0;
        let expected_snr = 10.0 * (signal / 2.0f64).log10();
        assert!((snr(reference.view(), query.view()).unwrap() - expected_snr).abs() < 1e-9);
    }

    #[test]
    fn report_bundles_all_metrics() {
        let reference = arr2(&[[100u16, 200], [300, 400]]);
        let query = arr2(&[[100u16, 200], [300, 404]]);
        let report = MetricsReport::compute(reference.view(), query.view(), 65535.0).unwrap();
        assert_eq!(report.mse, 4.0);
        assert_eq!(report.rmse, 2.0);
        assert!(report.psnr.is_finite() && report.psnr > 0.0);
        assert!(report.snr.is_finite());
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = Array2::<u8>::zeros((2, 4));
        let b = Array2::<u8>::zeros((4, 2));
        assert!(matches!(mse(a.view(), b.view()), Err(BayerError::InvalidInput(_))));
    }

    #[test]
    fn difference_is_centred_and_clamped() {
        let reference = Array3::from_shape_vec((1, 1, 3), vec![200u8, 10, 50]).unwrap();
        let query = Array3::from_shape_vec((1, 1, 3), vec![0u8, 250, 50]).unwrap();
        let diff = difference_image(reference.view(), query.view()).unwrap();
        assert_eq!(diff.iter().copied().collect::<Vec<_>>(), vec![255, 0, 127]);
    }
}
