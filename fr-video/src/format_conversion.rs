//! Planar I420 to packed 32-bit RGB conversion
//!
//! Single pass, row-parallel with rayon. Each destination row is produced
//! from one luma row and the chroma row covering it; nothing is shared
//! between rows, so independent buffers can be converted concurrently.

use crate::color::YuvMatrix;
use crate::error::{ConvertError, Result};
use crate::frame::I420Buffer;
use crate::types::{FourCc, PackedLayout};
use rayon::prelude::*;

const BYTES_PER_PIXEL: usize = 4;

/// Rows handed to one rayon task
const MIN_ROWS_PER_TASK: usize = 16;

/// Convert `src` into packed pixels of layout `format`
///
/// `dst_stride` of 0 means tightly packed (`width * 4`). A negative
/// `height` writes the image bottom-up: source row 0 lands on the last
/// destination row. `width` and `|height|` must match the source, scale
/// first if they do not.
pub fn convert_from_i420(
    src: &I420Buffer,
    dst: &mut [u8],
    dst_stride: usize,
    width: u32,
    height: i32,
    format: FourCc,
    matrix: &YuvMatrix,
) -> Result<()> {
    let layout = format
        .layout()
        .ok_or(ConvertError::UnsupportedFormat(format))?;

    let flip = height < 0;
    let rows = height.unsigned_abs();
    if width == 0 || rows == 0 {
        return Err(ConvertError::InvalidDimensions {
            width,
            height: rows,
        });
    }
    if width != src.width() || rows != src.height() {
        return Err(ConvertError::DimensionMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: width,
            dst_height: rows,
        });
    }

    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let stride = if dst_stride == 0 { row_bytes } else { dst_stride };
    if stride < row_bytes {
        return Err(ConvertError::InvalidStride { stride, width });
    }

    let rows = rows as usize;
    let needed = stride * (rows - 1) + row_bytes;
    if dst.len() < needed {
        return Err(ConvertError::BufferTooSmall {
            needed,
            actual: dst.len(),
        });
    }

    dst[..needed]
        .par_chunks_mut(stride)
        .with_min_len(MIN_ROWS_PER_TASK)
        .enumerate()
        .for_each(|(dst_row, chunk)| {
            let src_row = if flip { rows - 1 - dst_row } else { dst_row };
            let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut chunk[..row_bytes]);
            convert_row(src, src_row, pixels, layout, matrix);
        });

    Ok(())
}

/// Packed size of a `width x height` frame
///
/// Saturates at `usize::MAX`; use [`try_packed_size`] to size a buffer.
pub fn packed_size(width: u32, height: u32) -> usize {
    try_packed_size(width, height).unwrap_or(usize::MAX)
}

/// Packed size of a `width x height` frame, or an error if it does not fit
pub fn try_packed_size(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(ConvertError::InvalidDimensions { width, height })
}

#[inline]
fn convert_row(
    src: &I420Buffer,
    row: usize,
    out: &mut [[u8; 4]],
    layout: PackedLayout,
    matrix: &YuvMatrix,
) {
    let y_line = &src.data_y()[row * src.stride_y()..];
    let u_line = &src.data_u()[(row / 2) * src.stride_u()..];
    let v_line = &src.data_v()[(row / 2) * src.stride_v()..];

    for (x, px) in out.iter_mut().enumerate() {
        let (r, g, b) = matrix.to_rgb(y_line[x], u_line[x / 2], v_line[x / 2]);
        *px = layout.pack(r, g, b, 255);
    }
}
