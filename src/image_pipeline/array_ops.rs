//! Array manipulation helpers shared by the pipeline

mod shift;
mod upscale;

pub use shift::{shift_2d, shift_2d_with, EdgeFill};
pub use upscale::upscale_nearest;
