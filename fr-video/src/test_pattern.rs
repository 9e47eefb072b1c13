//! Synthetic I420 frames for tests, benches and pipeline bring-up
//!
//! Colors are given in RGB and encoded with BT.601 limited range. Chroma
//! for each 2x2 block is taken from its top-left pixel.

use crate::color::rgb_to_yuv_bt601;
use crate::error::Result;
use crate::frame::I420Buffer;

/// Build a frame from a per-pixel (Y, U, V) function
pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<I420Buffer>
where
    F: Fn(u32, u32) -> (u8, u8, u8),
{
    let mut buf = I420Buffer::new(width, height)?;
    let (cw, ch) = (buf.chroma_width(), buf.chroma_height());
    let (sy, su, sv) = (buf.stride_y(), buf.stride_u(), buf.stride_v());
    let (y_plane, u_plane, v_plane) = buf.planes_mut();

    for y in 0..height {
        for x in 0..width {
            y_plane[y as usize * sy + x as usize] = f(x, y).0;
        }
    }
    for y in 0..ch {
        for x in 0..cw {
            let (_, u, v) = f(x * 2, y * 2);
            u_plane[y as usize * su + x as usize] = u;
            v_plane[y as usize * sv + x as usize] = v;
        }
    }

    Ok(buf)
}

/// Single-color frame
pub fn solid(width: u32, height: u32, rgb: (u8, u8, u8)) -> Result<I420Buffer> {
    let yuv = rgb_to_yuv_bt601(rgb.0, rgb.1, rgb.2);
    from_fn(width, height, |_, _| yuv)
}

/// Checkerboard of `cell`-pixel squares, `a` in the top-left corner
pub fn checkerboard(
    width: u32,
    height: u32,
    cell: u32,
    a: (u8, u8, u8),
    b: (u8, u8, u8),
) -> Result<I420Buffer> {
    let cell = cell.max(1);
    let ya = rgb_to_yuv_bt601(a.0, a.1, a.2);
    let yb = rgb_to_yuv_bt601(b.0, b.1, b.2);
    from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            ya
        } else {
            yb
        }
    })
}
