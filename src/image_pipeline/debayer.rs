//! Demosaicing module for reconstructing RGB images from Bayer mosaics

pub mod border;
pub mod classes;
pub mod nearest;

pub use border::{BorderedFrame, Direction, BORDER};
pub use classes::{PositionClass, PositionClasses};
pub use nearest::{debayer, debayer_dyn, NearestNeighborDebayer};
