use thiserror::Error;

/// Errors raised by the mask, sampling, demosaic and shift operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BayerError {
    #[error("Invalid phase {phase:?}: {reason}")]
    InvalidPhase { phase: String, reason: String },

    #[error("Frame shape {height}x{width} cannot be tiled by a 2x2 phase")]
    ShapeMismatch { height: usize, width: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Shift of {shift} along {axis} is out of range for length {len}")]
    OutOfRange {
        axis: &'static str,
        shift: isize,
        len: usize,
    },
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Bayer(#[from] BayerError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
