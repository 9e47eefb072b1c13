//! Frame relay video primitives
//!
//! Planar frame types and the conversions a render consumer needs on read.
//!
//! Key pieces:
//! - I420 buffers shared by `Arc` between decoder and consumer
//! - Single-pass I420 -> packed 32-bit RGB with optional vertical flip
//! - Bilinear resampling into a caller-chosen resolution (fast_image_resize)
//! - Row-parallel packed conversion via rayon

pub mod color;
pub mod error;
pub mod format_conversion;
pub mod frame;
pub mod scale;
pub mod test_pattern;
pub mod types;

pub use color::*;
pub use error::*;
pub use format_conversion::*;
pub use frame::*;
pub use types::*;
