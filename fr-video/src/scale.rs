//! Plane scaling for I420 buffers
//!
//! Each plane is resized as a single-channel `U8` image with
//! fast_image_resize's bilinear convolution (SIMD when available).

use crate::error::{ConvertError, Result};
use crate::frame::I420Buffer;
use fast_image_resize as fr;
use fr::images::Image;

impl I420Buffer {
    /// New buffer of `width x height` holding `self` resampled
    pub fn scaled(&self, width: u32, height: u32) -> Result<I420Buffer> {
        let mut out = I420Buffer::new(width, height)?;
        out.scale_from(self)?;
        Ok(out)
    }

    /// Resample `src` into this buffer's resolution, all three planes
    pub fn scale_from(&mut self, src: &I420Buffer) -> Result<()> {
        let (dw, dh) = (self.width(), self.height());
        let (dcw, dch) = (self.chroma_width(), self.chroma_height());
        let (sw, sh) = (src.width(), src.height());
        let (scw, sch) = (src.chroma_width(), src.chroma_height());
        let strides = (self.stride_y(), self.stride_u(), self.stride_v());

        let mut resizer = fr::Resizer::new();
        let (y, u, v) = self.planes_mut();
        scale_plane(&mut resizer, src.data_y(), src.stride_y(), sw, sh, y, strides.0, dw, dh)?;
        scale_plane(&mut resizer, src.data_u(), src.stride_u(), scw, sch, u, strides.1, dcw, dch)?;
        scale_plane(&mut resizer, src.data_v(), src.stride_v(), scw, sch, v, strides.2, dcw, dch)?;
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn scale_plane(
    resizer: &mut fr::Resizer,
    src: &[u8],
    src_stride: usize,
    src_w: u32,
    src_h: u32,
    dst: &mut [u8],
    dst_stride: usize,
    dst_w: u32,
    dst_h: u32,
) -> Result<()> {
    if (src_w, src_h) == (dst_w, dst_h) {
        copy_rows(src, src_stride, dst, dst_stride, dst_w as usize, dst_h as usize);
        return Ok(());
    }

    // The resizer wants tightly packed rows
    let mut tight = vec![0u8; src_w as usize * src_h as usize];
    copy_rows(src, src_stride, &mut tight, src_w as usize, src_w as usize, src_h as usize);

    let src_image = Image::from_vec_u8(src_w, src_h, tight, fr::PixelType::U8)
        .map_err(|e| ConvertError::Resize(e.to_string()))?;
    let mut dst_image = Image::new(dst_w, dst_h, fr::PixelType::U8);

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ConvertError::Resize(e.to_string()))?;

    copy_rows(dst_image.buffer(), dst_w as usize, dst, dst_stride, dst_w as usize, dst_h as usize);
    Ok(())
}

fn copy_rows(src: &[u8], src_stride: usize, dst: &mut [u8], dst_stride: usize, row: usize, rows: usize) {
    for r in 0..rows {
        dst[r * dst_stride..r * dst_stride + row]
            .copy_from_slice(&src[r * src_stride..r * src_stride + row]);
    }
}
