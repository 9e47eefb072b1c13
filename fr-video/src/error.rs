//! Conversion errors

use crate::types::FourCc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported destination format {0}")]
    UnsupportedFormat(FourCc),

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("source is {src_width}x{src_height}, destination is {dst_width}x{dst_height}")]
    DimensionMismatch {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },

    #[error("destination stride {stride} is shorter than a {width}-pixel row")]
    InvalidStride { stride: usize, width: u32 },

    #[error("destination buffer holds {actual} bytes, {needed} needed")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("plane {plane} holds {actual} bytes, {needed} needed")]
    PlaneTooSmall {
        plane: usize,
        needed: usize,
        actual: usize,
    },

    #[error("plane resize failed: {0}")]
    Resize(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
