//! Single-entry latest-frame cache shared by producer and consumer
//!
//! The held frame is an immutable record published with an atomic pointer
//! swap, so neither side ever waits on the other. The consumer side keeps a
//! `last consumed` watermark that only moves forward and never passes the
//! stored timestamp.

use arc_swap::ArcSwapOption;
use fr_video::I420Buffer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Frame record held by the slot
#[derive(Debug)]
pub struct SlotFrame {
    pub buffer: Arc<I420Buffer>,
    /// Arrival time in microseconds, unique per stored frame
    pub timestamp_us: u64,
    pub frame_id: u16,
}

impl SlotFrame {
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}

/// Outcome of [`FrameSlot::load`]
#[derive(Debug)]
pub enum SlotRead {
    /// A frame not handed out before
    Fresh(Arc<SlotFrame>),
    /// Nothing newer than the last fresh read
    Unchanged,
    /// Nothing stored yet
    Empty,
}

impl SlotRead {
    pub fn into_fresh(self) -> Option<Arc<SlotFrame>> {
        match self {
            SlotRead::Fresh(frame) => Some(frame),
            SlotRead::Unchanged | SlotRead::Empty => None,
        }
    }
}

pub struct FrameSlot {
    current: ArcSwapOption<SlotFrame>,
    last_consumed_us: AtomicU64,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            last_consumed_us: AtomicU64::new(0),
        }
    }

    /// Replace the held frame; the previous record is released once no
    /// reader still holds it
    ///
    /// Timestamps must increase from one store to the next.
    pub fn store(&self, buffer: Arc<I420Buffer>, timestamp_us: u64, frame_id: u16) {
        self.current.store(Some(Arc::new(SlotFrame {
            buffer,
            timestamp_us,
            frame_id,
        })));
    }

    /// Take the held frame if it has not been handed out yet
    ///
    /// When readers race on the same frame exactly one of them gets
    /// [`SlotRead::Fresh`].
    pub fn load(&self) -> SlotRead {
        let Some(frame) = self.current.load_full() else {
            return SlotRead::Empty;
        };

        let previous = self
            .last_consumed_us
            .fetch_max(frame.timestamp_us, Ordering::AcqRel);
        if previous >= frame.timestamp_us {
            SlotRead::Unchanged
        } else {
            SlotRead::Fresh(frame)
        }
    }

    /// Held frame without touching the consumed watermark
    pub fn peek(&self) -> Option<Arc<SlotFrame>> {
        self.current.load_full()
    }

    /// Timestamp of the held frame, 0 when empty
    pub fn stored_timestamp(&self) -> u64 {
        self.current
            .load_full()
            .map(|frame| frame.timestamp_us)
            .unwrap_or(0)
    }

    pub fn last_consumed_timestamp(&self) -> u64 {
        self.last_consumed_us.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.current.load_full().is_none()
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
