use std::io::Write;

use ndarray::{ArrayView2, ArrayView3};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::Sample;
use crate::image_pipeline::tiff::types::ConversionConfig;

/// Grid ready to be encoded, tagged with its TIFF color type.
#[derive(Debug, Clone)]
pub enum TiffFrame<'a> {
    Gray8(ArrayView2<'a, u8>),
    Gray16(ArrayView2<'a, u16>),
    Rgb8(ArrayView3<'a, u8>),
    Rgb16(ArrayView3<'a, u16>),
}

impl TiffFrame<'_> {
    /// `(height, width)` of the frame.
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Self::Gray8(view) => view.dim(),
            Self::Gray16(view) => view.dim(),
            Self::Rgb8(view) => (view.dim().0, view.dim().1),
            Self::Rgb16(view) => (view.dim().0, view.dim().1),
        }
    }
}

/// Sample types that map onto a TIFF gray and RGB color type.
pub trait TiffSample: Sample {
    fn gray_frame(view: ArrayView2<'_, Self>) -> TiffFrame<'_>;
    fn rgb_frame(view: ArrayView3<'_, Self>) -> TiffFrame<'_>;
}

impl TiffSample for u8 {
    fn gray_frame(view: ArrayView2<'_, Self>) -> TiffFrame<'_> {
        TiffFrame::Gray8(view)
    }

    fn rgb_frame(view: ArrayView3<'_, Self>) -> TiffFrame<'_> {
        TiffFrame::Rgb8(view)
    }
}

impl TiffSample for u16 {
    fn gray_frame(view: ArrayView2<'_, Self>) -> TiffFrame<'_> {
        TiffFrame::Gray16(view)
    }

    fn rgb_frame(view: ArrayView3<'_, Self>) -> TiffFrame<'_> {
        TiffFrame::Rgb16(view)
    }
}

pub trait TiffWriter {
    fn write_tiff(&self, frame: &TiffFrame<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
