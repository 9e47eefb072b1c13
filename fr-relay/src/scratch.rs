//! Reusable conversion output

use fr_video::FourCc;
use parking_lot::MutexGuard;
use std::fmt;
use std::ops::Deref;

/// Single output buffer owned by a relay, reused across conversions
pub struct ScratchBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: FourCc,
    frame_id: u16,
    timestamp_us: u64,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            format: FourCc(0),
            frame_id: 0,
            timestamp_us: 0,
        }
    }

    /// Resize to exactly `len` bytes if the length differs
    ///
    /// Returns true when a resize happened. Existing bytes are kept up to
    /// the new length.
    pub fn ensure_len(&mut self, len: usize) -> bool {
        if self.data.len() == len {
            return false;
        }
        self.data.resize(len, 0);
        true
    }

    pub(crate) fn describe(
        &mut self,
        width: u32,
        height: u32,
        format: FourCc,
        frame_id: u16,
        timestamp_us: u64,
    ) {
        self.width = width;
        self.height = height;
        self.format = format;
        self.frame_id = frame_id;
        self.timestamp_us = timestamp_us;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of the relay's scratch buffer after a conversion
///
/// While a view is alive the relay refuses further conversions, so the
/// bytes cannot change underneath it. Drop it before asking for the next
/// frame.
pub struct ScratchView<'a> {
    guard: MutexGuard<'a, ScratchBuffer>,
}

impl<'a> ScratchView<'a> {
    pub(crate) fn new(guard: MutexGuard<'a, ScratchBuffer>) -> Self {
        Self { guard }
    }

    pub fn width(&self) -> u32 {
        self.guard.width
    }

    pub fn height(&self) -> u32 {
        self.guard.height
    }

    /// Bytes per row, always tightly packed
    pub fn stride(&self) -> usize {
        self.guard.width as usize * 4
    }

    pub fn format(&self) -> FourCc {
        self.guard.format
    }

    /// Source frame id of the converted frame
    pub fn frame_id(&self) -> u16 {
        self.guard.frame_id
    }

    /// Arrival stamp of the converted frame
    pub fn timestamp_us(&self) -> u64 {
        self.guard.timestamp_us
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.guard.data.as_ptr()
    }
}

impl Deref for ScratchView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.guard.as_slice()
    }
}

impl fmt::Debug for ScratchView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchView")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .field("frame_id", &self.frame_id())
            .field("len", &self.len())
            .finish()
    }
}
