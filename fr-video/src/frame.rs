//! Planar frame buffers handed over by the decode pipeline

use crate::error::{ConvertError, Result};
use std::fmt;
use std::sync::Arc;

/// Storage class of a delivered buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Planar YUV 4:2:0 in system memory
    I420,
    /// Opaque or hardware-backed; must be mapped to I420 before use
    Native,
}

/// Reference-counted, immutable image produced by the decode pipeline
///
/// Implementors outside this crate wrap decoder or hardware surfaces and
/// provide the planar mapping through [`VideoFrameBuffer::to_i420`].
pub trait VideoFrameBuffer: Send + Sync {
    fn kind(&self) -> BufferKind;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Planar form of this buffer, or `None` if the mapping failed
    fn to_i420(self: Arc<Self>) -> Option<Arc<I420Buffer>>;
}

/// A frame as delivered by the media pipeline
#[derive(Clone)]
pub struct VideoFrame {
    pub buffer: Arc<dyn VideoFrameBuffer>,
    /// Wrapping source identifier
    pub id: u16,
}

impl VideoFrame {
    pub fn new(buffer: Arc<dyn VideoFrameBuffer>, id: u16) -> Self {
        Self { buffer, id }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}

impl fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFrame")
            .field("id", &self.id)
            .field("kind", &self.buffer.kind())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Planar YUV 4:2:0 buffer
///
/// Y at full resolution, U and V at `ceil(w/2) x ceil(h/2)`, each plane with
/// its own stride.
#[derive(Clone)]
pub struct I420Buffer {
    width: u32,
    height: u32,
    stride_y: usize,
    stride_u: usize,
    stride_v: usize,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
}

impl I420Buffer {
    /// Allocate a black frame with tightly packed planes
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;

        let stride_y = width as usize;
        let stride_uv = chroma_extent(width);
        let uv_rows = chroma_extent(height);

        Ok(Self {
            width,
            height,
            stride_y,
            stride_u: stride_uv,
            stride_v: stride_uv,
            y: vec![16u8; stride_y * height as usize],
            u: vec![128u8; stride_uv * uv_rows],
            v: vec![128u8; stride_uv * uv_rows],
        })
    }

    /// Wrap decoded planes, validating strides and plane lengths
    #[allow(clippy::too_many_arguments)]
    pub fn from_planes(
        width: u32,
        height: u32,
        y: Vec<u8>,
        stride_y: usize,
        u: Vec<u8>,
        stride_u: usize,
        v: Vec<u8>,
        stride_v: usize,
    ) -> Result<Self> {
        check_dimensions(width, height)?;

        let chroma_w = chroma_extent(width);
        let chroma_h = chroma_extent(height);
        check_plane(0, &y, stride_y, width as usize, height as usize)?;
        check_plane(1, &u, stride_u, chroma_w, chroma_h)?;
        check_plane(2, &v, stride_v, chroma_w, chroma_h)?;

        Ok(Self {
            width,
            height,
            stride_y,
            stride_u,
            stride_v,
            y,
            u,
            v,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn chroma_width(&self) -> u32 {
        chroma_extent(self.width) as u32
    }

    pub fn chroma_height(&self) -> u32 {
        chroma_extent(self.height) as u32
    }

    pub fn data_y(&self) -> &[u8] {
        &self.y
    }

    pub fn data_u(&self) -> &[u8] {
        &self.u
    }

    pub fn data_v(&self) -> &[u8] {
        &self.v
    }

    pub fn stride_y(&self) -> usize {
        self.stride_y
    }

    pub fn stride_u(&self) -> usize {
        self.stride_u
    }

    pub fn stride_v(&self) -> usize {
        self.stride_v
    }

    /// Mutable access to all three planes at once, for writers
    pub fn planes_mut(&mut self) -> (&mut [u8], &mut [u8], &mut [u8]) {
        (&mut self.y, &mut self.u, &mut self.v)
    }

    /// (Y, U, V) sample covering pixel `(x, y)`
    pub fn sample(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let (x, y) = (x as usize, y as usize);
        (
            self.y[y * self.stride_y + x],
            self.u[(y / 2) * self.stride_u + x / 2],
            self.v[(y / 2) * self.stride_v + x / 2],
        )
    }
}

impl VideoFrameBuffer for I420Buffer {
    fn kind(&self) -> BufferKind {
        BufferKind::I420
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn to_i420(self: Arc<Self>) -> Option<Arc<I420Buffer>> {
        Some(self)
    }
}

impl fmt::Debug for I420Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I420Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("strides", &[self.stride_y, self.stride_u, self.stride_v])
            .finish()
    }
}

pub(crate) fn chroma_extent(luma: u32) -> usize {
    luma.div_ceil(2) as usize
}

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 16_384;

/// Reject empty frames and frames wider or taller than [`MAX_DIMENSION`]
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ConvertError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_plane(plane: usize, data: &[u8], stride: usize, row: usize, rows: usize) -> Result<()> {
    if stride < row {
        return Err(ConvertError::InvalidStride {
            stride,
            width: row as u32,
        });
    }
    let needed = stride * (rows - 1) + row;
    if data.len() < needed {
        return Err(ConvertError::PlaneTooSmall {
            plane,
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}
