//! Latest-frame relay between a decode pipeline and a render consumer
//!
//! The producer pushes frames with [`FrameRelay::ingest`]; the consumer polls
//! [`FrameRelay::convert`] on its own cadence. Only the newest frame is kept,
//! a frame is converted at most once, and no call waits on the other side.

use crate::clock::ArrivalClock;
use crate::config::{RelayConfig, SizeNotify};
use crate::frame_slot::{FrameSlot, SlotFrame, SlotRead};
use crate::observer::{FrameSizeObserver, RelayId};
use crate::scratch::{ScratchBuffer, ScratchView};
use fr_video::{
    check_dimensions, convert_from_i420, try_packed_size, ConvertError, FourCc, VideoFrame,
    VideoFrameBuffer, YuvMatrix,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_RELAY_ID: AtomicU32 = AtomicU32::new(1);

/// No dimensions reported yet
const NO_SIZE: u64 = u64::MAX;

pub struct FrameRelay {
    id: RelayId,
    config: RelayConfig,
    matrix: YuvMatrix,

    slot: FrameSlot,
    clock: ArrivalClock,

    // Invoked on the producer thread
    observer: Box<dyn FrameSizeObserver>,
    last_size: AtomicU64,

    // Consumer-owned output, valid until the next convert
    scratch: Mutex<ScratchBuffer>,

    counters: Counters,
}

#[derive(Default)]
struct Counters {
    ingested: AtomicU64,
    dropped: AtomicU64,
    acquired: AtomicU64,
    duplicates: AtomicU64,
    empty_reads: AtomicU64,
    converted: AtomicU64,
    conversion_failures: AtomicU64,
}

impl FrameRelay {
    /// Create a relay with the next process-wide id
    pub fn new(config: RelayConfig, observer: impl FrameSizeObserver + 'static) -> Self {
        let id = RelayId(NEXT_RELAY_ID.fetch_add(1, Ordering::Relaxed));
        Self::with_id(id, config, observer)
    }

    /// Create a relay with an id chosen by the host
    pub fn with_id(
        id: RelayId,
        config: RelayConfig,
        observer: impl FrameSizeObserver + 'static,
    ) -> Self {
        log::debug!("Create frame relay {}", id);

        Self {
            id,
            config,
            matrix: config.matrix(),
            slot: FrameSlot::new(),
            clock: ArrivalClock::new(),
            observer: Box::new(observer),
            last_size: AtomicU64::new(NO_SIZE),
            scratch: Mutex::new(ScratchBuffer::new()),
            counters: Counters::default(),
        }
    }

    pub fn id(&self) -> RelayId {
        self.id
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Arrival stamp of the frame currently held, 0 when empty
    pub fn stored_timestamp(&self) -> u64 {
        self.slot.stored_timestamp()
    }

    /// Arrival stamp of the newest frame handed to the consumer
    pub fn last_consumed_timestamp(&self) -> u64 {
        self.slot.last_consumed_timestamp()
    }

    /// Accept a frame from the producer (never blocks)
    ///
    /// Native buffers are mapped to I420 first; if that fails the frame is
    /// dropped. The size observer then runs on this thread.
    pub fn ingest(&self, frame: VideoFrame) {
        let kind = frame.buffer.kind();
        let Some(buffer) = frame.buffer.to_i420() else {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            log::warn!(
                "Relay {}: frame {} ({:?}) could not be mapped to I420, dropped",
                self.id,
                frame.id,
                kind
            );
            return;
        };

        let (width, height) = (buffer.width(), buffer.height());
        let timestamp_us = self.clock.stamp();
        self.slot.store(buffer, timestamp_us, frame.id);
        self.counters.ingested.fetch_add(1, Ordering::Relaxed);

        log::trace!(
            "Relay {}: stored frame {} {}x{} at {}",
            self.id,
            frame.id,
            width,
            height,
            timestamp_us
        );

        self.notify_size(width, height);
    }

    fn notify_size(&self, width: u32, height: u32) {
        let packed = (width as u64) << 32 | height as u64;
        let previous = self.last_size.swap(packed, Ordering::AcqRel);

        let notify = match self.config.size_notify {
            SizeNotify::EveryFrame => true,
            SizeNotify::OnChange => previous != packed,
        };
        if notify {
            self.observer.on_frame_size(self.id, width, height);
        }
    }

    /// Newest frame if it has not been handed out yet
    ///
    /// `None` covers both "nothing new since the last read" and "nothing
    /// ingested yet"; [`RelayStats`] keeps the two apart.
    pub fn acquire(&self) -> Option<Arc<SlotFrame>> {
        match self.slot.load() {
            SlotRead::Fresh(frame) => {
                self.counters.acquired.fetch_add(1, Ordering::Relaxed);
                Some(frame)
            }
            SlotRead::Unchanged => {
                self.counters.duplicates.fetch_add(1, Ordering::Relaxed);
                log::trace!("Relay {}: no new frame, skipped", self.id);
                None
            }
            SlotRead::Empty => {
                self.counters.empty_reads.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Convert the newest unseen frame to `width x height` packed `format`
    ///
    /// Returns `None` when there is nothing new to show, or when the view
    /// from a previous call is still alive. A failed pixel conversion is
    /// logged and counted, and the scratch is returned as it was: its bytes
    /// and metadata always describe the last successful conversion.
    pub fn convert(&self, width: u32, height: u32, format: FourCc) -> Option<ScratchView<'_>> {
        let Some(mut scratch) = self.scratch.try_lock() else {
            log::trace!("Relay {}: scratch buffer still borrowed", self.id);
            return None;
        };
        let frame = self.acquire()?;

        match self.convert_into(&mut scratch, &frame, width, height, format) {
            Ok(()) => {
                self.counters.converted.fetch_add(1, Ordering::Relaxed);
                scratch.describe(width, height, format, frame.frame_id, frame.timestamp_us);
            }
            Err(err) => {
                self.counters.conversion_failures.fetch_add(1, Ordering::Relaxed);
                log::warn!(
                    "Relay {}: failed to convert frame {} to {}x{} {}: {}",
                    self.id,
                    frame.frame_id,
                    width,
                    height,
                    format,
                    err
                );
            }
        }

        log::trace!(
            "Relay {}: frame {} ready {}us after arrival",
            self.id,
            frame.frame_id,
            ArrivalClock::wall_us().saturating_sub(frame.timestamp_us)
        );

        Some(ScratchView::new(scratch))
    }

    fn convert_into(
        &self,
        scratch: &mut ScratchBuffer,
        frame: &SlotFrame,
        width: u32,
        height: u32,
        format: FourCc,
    ) -> Result<(), ConvertError> {
        // Reject the request before the scratch bytes are touched
        format.layout().ok_or(ConvertError::UnsupportedFormat(format))?;
        check_dimensions(width, height)?;
        let len = try_packed_size(width, height)?;
        let rows = i32::try_from(height)
            .map_err(|_| ConvertError::InvalidDimensions { width, height })?;
        let rows = if self.config.flip_vertical { -rows } else { rows };

        let scaled;
        let source = if (width, height) == (frame.buffer.width(), frame.buffer.height()) {
            &*frame.buffer
        } else {
            scaled = frame.buffer.scaled(width, height)?;
            &scaled
        };

        if scratch.ensure_len(len) {
            log::trace!(
                "Relay {}: scratch resized to {}x{} ({} bytes)",
                self.id,
                width,
                height,
                len
            );
        }

        convert_from_i420(source, scratch.as_mut_slice(), 0, width, rows, format, &self.matrix)
    }

    /// Get statistics
    pub fn stats(&self) -> RelayStats {
        RelayStats {
            frames_ingested: self.counters.ingested.load(Ordering::Relaxed),
            frames_dropped: self.counters.dropped.load(Ordering::Relaxed),
            frames_acquired: self.counters.acquired.load(Ordering::Relaxed),
            duplicate_reads: self.counters.duplicates.load(Ordering::Relaxed),
            empty_reads: self.counters.empty_reads.load(Ordering::Relaxed),
            conversions: self.counters.converted.load(Ordering::Relaxed),
            conversion_failures: self.counters.conversion_failures.load(Ordering::Relaxed),
        }
    }
}

impl Drop for FrameRelay {
    fn drop(&mut self) {
        log::debug!("Destroy frame relay {}", self.id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayStats {
    pub frames_ingested: u64,
    /// Native frames that could not be mapped to I420
    pub frames_dropped: u64,
    pub frames_acquired: u64,
    pub duplicate_reads: u64,
    pub empty_reads: u64,
    pub conversions: u64,
    pub conversion_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fr_video::{test_pattern, BufferKind, ColorRange, ColorSpace, I420Buffer, PackedLayout};
    use rand::Rng;
    use std::sync::atomic::AtomicBool;
    use std::time::{Duration, Instant};

    fn relay() -> FrameRelay {
        FrameRelay::new(RelayConfig::default(), |_: RelayId, _: u32, _: u32| {})
    }

    fn solid_frame(w: u32, h: u32, rgb: (u8, u8, u8), id: u16) -> VideoFrame {
        VideoFrame::new(Arc::new(test_pattern::solid(w, h, rgb).unwrap()), id)
    }

    fn within(a: u8, b: u8) -> bool {
        (a as i32 - b as i32).abs() <= 3
    }

    /// Hardware-style buffer that maps to I420 on demand
    struct NativeSurface {
        planar: Option<I420Buffer>,
        width: u32,
        height: u32,
    }

    impl VideoFrameBuffer for NativeSurface {
        fn kind(&self) -> BufferKind {
            BufferKind::Native
        }

        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn to_i420(self: Arc<Self>) -> Option<Arc<I420Buffer>> {
            self.planar.clone().map(Arc::new)
        }
    }

    #[test]
    fn test_nothing_ingested_yields_no_data() {
        let relay = relay();
        assert!(relay.acquire().is_none());
        assert!(relay.convert(4, 4, FourCc::ARGB).is_none());
        assert_eq!(relay.stats().empty_reads, 2);
    }

    #[test]
    fn test_second_read_without_ingest_is_no_data() {
        let relay = relay();
        relay.ingest(solid_frame(4, 4, (255, 0, 0), 1));

        assert!(relay.convert(4, 4, FourCc::ARGB).is_some());
        assert!(relay.convert(4, 4, FourCc::ARGB).is_none());

        relay.ingest(solid_frame(4, 4, (255, 0, 0), 2));
        assert_eq!(relay.acquire().unwrap().frame_id, 2);
        assert!(relay.acquire().is_none());

        let stats = relay.stats();
        assert_eq!(stats.frames_acquired, 2);
        assert_eq!(stats.duplicate_reads, 2);
    }

    #[test]
    fn test_latest_ingest_wins() {
        let relay = relay();
        for id in 1..=5 {
            relay.ingest(solid_frame(2, 2, (0, 0, 0), id));
        }
        assert_eq!(relay.acquire().unwrap().frame_id, 5);
        assert_eq!(relay.stats().frames_ingested, 5);
    }

    #[test]
    fn test_timestamps_unique_and_watermark_bounded() {
        let relay = relay();
        let mut last = 0;
        for id in 0..50 {
            relay.ingest(solid_frame(2, 2, (0, 0, 0), id));
            let stored = relay.stored_timestamp();
            assert!(stored > last);
            last = stored;
            if id % 3 == 0 {
                let _ = relay.acquire();
            }
            assert!(relay.last_consumed_timestamp() <= relay.stored_timestamp());
        }
    }

    #[test]
    fn test_observer_fires_on_every_frame() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();
        let relay = FrameRelay::with_id(RelayId(42), RelayConfig::default(), move |id: RelayId, w: u32, h: u32| {
            seen.lock().push((id, w, h));
        });

        relay.ingest(solid_frame(4, 2, (0, 0, 0), 0));
        relay.ingest(solid_frame(4, 2, (0, 0, 0), 1));
        relay.ingest(solid_frame(8, 6, (0, 0, 0), 2));

        assert_eq!(
            *calls.lock(),
            vec![
                (RelayId(42), 4, 2),
                (RelayId(42), 4, 2),
                (RelayId(42), 8, 6)
            ]
        );
    }

    #[test]
    fn test_observer_on_change_only() {
        let calls = Arc::new(AtomicU64::new(0));
        let count = calls.clone();
        let config = RelayConfig {
            size_notify: SizeNotify::OnChange,
            ..RelayConfig::default()
        };
        let relay = FrameRelay::new(config, move |_: RelayId, _: u32, _: u32| {
            count.fetch_add(1, Ordering::Relaxed);
        });

        for (w, h) in [(4, 4), (4, 4), (4, 4), (8, 4), (8, 4), (4, 4)] {
            relay.ingest(solid_frame(w, h, (0, 0, 0), 0));
        }
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_relay_ids_are_distinct() {
        let a = relay();
        let b = relay();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_native_buffer_is_mapped() {
        let relay = relay();
        let planar = test_pattern::solid(4, 4, (255, 255, 255)).unwrap();
        relay.ingest(VideoFrame::new(
            Arc::new(NativeSurface {
                planar: Some(planar),
                width: 4,
                height: 4,
            }),
            9,
        ));

        let view = relay.convert(4, 4, FourCc::ABGR).unwrap();
        assert_eq!(view.frame_id(), 9);
        assert!(view.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_unmappable_native_buffer_is_dropped() {
        let calls = Arc::new(AtomicU64::new(0));
        let count = calls.clone();
        let relay = FrameRelay::new(RelayConfig::default(), move |_: RelayId, _: u32, _: u32| {
            count.fetch_add(1, Ordering::Relaxed);
        });

        relay.ingest(VideoFrame::new(
            Arc::new(NativeSurface {
                planar: None,
                width: 4,
                height: 4,
            }),
            1,
        ));

        assert!(relay.acquire().is_none());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        let stats = relay.stats();
        assert_eq!(stats.frames_dropped, 1);
        assert_eq!(stats.frames_ingested, 0);
    }

    #[test]
    fn test_identity_conversion_is_flipped_source() {
        let (w, h) = (4, 4);
        let top = (255, 255, 255);
        let bottom = (0, 0, 255);
        let src = test_pattern::from_fn(w, h, |_, y| {
            let c = if y < 2 { top } else { bottom };
            fr_video::rgb_to_yuv_bt601(c.0, c.1, c.2)
        })
        .unwrap();

        let relay = relay();
        relay.ingest(VideoFrame::new(Arc::new(src), 0));
        let view = relay.convert(w, h, FourCc::ABGR).unwrap();
        assert_eq!(view.len(), (w * h * 4) as usize);
        assert_eq!((view.width(), view.height(), view.stride()), (w, h, 16));

        let pixels: &[[u8; 4]] = bytemuck::cast_slice(&view[..]);
        for y in 0..h as usize {
            // Destination row 0 holds the last source row
            let expected = if y < 2 { bottom } else { top };
            for px in &pixels[y * w as usize..(y + 1) * w as usize] {
                let (r, g, b, a) = PackedLayout::Abgr.unpack(*px);
                assert!(
                    within(r, expected.0) && within(g, expected.1) && within(b, expected.2),
                    "row {} got {:?}",
                    y,
                    (r, g, b)
                );
                assert_eq!(a, 255);
            }
        }
    }

    #[test]
    fn test_flip_disabled_keeps_orientation() {
        let config = RelayConfig {
            flip_vertical: false,
            ..RelayConfig::default()
        };
        let relay = FrameRelay::new(config, |_: RelayId, _: u32, _: u32| {});
        let src = test_pattern::from_fn(2, 4, |_, y| {
            if y < 2 {
                fr_video::rgb_to_yuv_bt601(255, 255, 255)
            } else {
                fr_video::rgb_to_yuv_bt601(0, 0, 0)
            }
        })
        .unwrap();
        relay.ingest(VideoFrame::new(Arc::new(src), 0));

        let view = relay.convert(2, 4, FourCc::ABGR).unwrap();
        assert_eq!(view[0], 255);
        assert_eq!(view[view.len() - 4], 0);
    }

    #[test]
    fn test_upscaled_checkerboard() {
        let (w, h, cell) = (16, 8, 4);
        let a = (255, 0, 0);
        let b = (0, 0, 255);
        let relay = relay();
        relay.ingest(VideoFrame::new(
            Arc::new(test_pattern::checkerboard(w, h, cell, a, b).unwrap()),
            0,
        ));

        let (dw, dh) = (w * 2, h * 2);
        let view = relay.convert(dw, dh, FourCc::ARGB).unwrap();
        assert_eq!(view.len(), (dw * dh * 4) as usize);

        let pixels: &[[u8; 4]] = bytemuck::cast_slice(&view[..]);
        let big = cell * 2;
        for cy in 0..h / cell {
            for cx in 0..w / cell {
                let expected = if (cx + cy) % 2 == 0 { a } else { b };
                for (ox, oy) in [(3, 3), (4, 4)] {
                    let x = cx * big + ox;
                    // Source row y is written to destination row dh - 1 - y
                    let y = dh - 1 - (cy * big + oy);
                    let (r, g, bl, _) = PackedLayout::Argb.unpack(pixels[(y * dw + x) as usize]);
                    assert!(
                        within(r, expected.0) && within(g, expected.1) && within(bl, expected.2),
                        "cell ({}, {}) got {:?}",
                        cx,
                        cy,
                        (r, g, bl)
                    );
                }
            }
        }
    }

    #[test]
    fn test_conversion_failure_still_returns_scratch() {
        let relay = relay();
        relay.ingest(solid_frame(4, 4, (255, 255, 255), 0));
        {
            let view = relay.convert(4, 4, FourCc::ABGR).unwrap();
            assert!(view.iter().all(|&b| b == 255));
        }

        // Unknown tag: scratch comes back untouched, not None, and still
        // describes frame 0
        relay.ingest(solid_frame(4, 4, (0, 0, 0), 1));
        let view = relay.convert(8, 2, FourCc::I420).unwrap();
        assert_eq!(view.len(), 64);
        assert_eq!((view.width(), view.height()), (4, 4));
        assert_eq!(view.format(), FourCc::ABGR);
        assert_eq!(view.frame_id(), 0);
        assert!(view.iter().all(|&b| b == 255));
        drop(view);

        let stats = relay.stats();
        assert_eq!(stats.conversions, 1);
        assert_eq!(stats.conversion_failures, 1);
    }

    #[test]
    fn test_zero_sized_request_is_absorbed() {
        let relay = relay();
        relay.ingest(solid_frame(4, 4, (0, 0, 0), 0));
        let view = relay.convert(0, 0, FourCc::ARGB).unwrap();
        assert!(view.is_empty());
        drop(view);
        assert_eq!(relay.stats().conversion_failures, 1);
    }

    #[test]
    fn test_oversized_request_is_absorbed() {
        let relay = relay();
        relay.ingest(solid_frame(4, 4, (0, 0, 0), 0));
        let view = relay.convert(u32::MAX, u32::MAX, FourCc::ARGB).unwrap();
        assert!(view.is_empty());
        assert_eq!((view.width(), view.height()), (0, 0));
        drop(view);

        relay.ingest(solid_frame(4, 4, (0, 0, 0), 1));
        assert!(relay.convert(u32::MAX, 1, FourCc::ARGB).unwrap().is_empty());

        let stats = relay.stats();
        assert_eq!(stats.conversion_failures, 2);
        assert_eq!(stats.conversions, 0);
    }

    #[test]
    fn test_color_settings_reach_the_converter() {
        // Y=16 gray: black in limited range, dark gray in full range
        let gray = |w, h| test_pattern::from_fn(w, h, |_, _| (16, 128, 128)).unwrap();

        let limited = relay();
        limited.ingest(VideoFrame::new(Arc::new(gray(2, 2)), 0));
        let view = limited.convert(2, 2, FourCc::ABGR).unwrap();
        assert!(view.chunks(4).all(|px| px == [0, 0, 0, 255]), "{:?}", &view[..]);
        drop(view);

        let config = RelayConfig {
            color_space: ColorSpace::Bt709,
            color_range: ColorRange::Full,
            ..RelayConfig::default()
        };
        let full = FrameRelay::new(config, |_: RelayId, _: u32, _: u32| {});
        full.ingest(VideoFrame::new(Arc::new(gray(2, 2)), 0));
        let view = full.convert(2, 2, FourCc::ABGR).unwrap();
        assert!(view.chunks(4).all(|px| px == [16, 16, 16, 255]), "{:?}", &view[..]);
    }

    #[test]
    fn test_bt709_differs_from_bt601_on_chroma() {
        // Strong red chroma decodes to a different green under each matrix
        let red = |w, h| test_pattern::from_fn(w, h, |_, _| (81, 90, 240)).unwrap();
        let bt709 = RelayConfig {
            color_space: ColorSpace::Bt709,
            ..RelayConfig::default()
        };

        let a = relay();
        let b = FrameRelay::new(bt709, |_: RelayId, _: u32, _: u32| {});
        a.ingest(VideoFrame::new(Arc::new(red(2, 2)), 0));
        b.ingest(VideoFrame::new(Arc::new(red(2, 2)), 0));

        let pa = a.convert(2, 2, FourCc::ABGR).unwrap()[..4].to_vec();
        let pb = b.convert(2, 2, FourCc::ABGR).unwrap()[..4].to_vec();
        // BT.709 puts more of V into red and less into green
        assert!(pb[0] >= pa[0], "{:?} vs {:?}", pa, pb);
        assert!(pb[1] >= pa[1] + 20, "{:?} vs {:?}", pa, pb);
    }

    #[test]
    fn test_outstanding_view_blocks_next_convert_without_consuming() {
        let relay = relay();
        relay.ingest(solid_frame(4, 4, (0, 0, 0), 1));
        let view = relay.convert(4, 4, FourCc::ARGB).unwrap();

        relay.ingest(solid_frame(4, 4, (0, 0, 0), 2));
        assert!(relay.convert(4, 4, FourCc::ARGB).is_none());
        drop(view);

        let next = relay.convert(4, 4, FourCc::ARGB).unwrap();
        assert_eq!(next.frame_id(), 2);
    }

    #[test]
    fn test_scratch_follows_requested_size() {
        let relay = relay();
        relay.ingest(solid_frame(8, 8, (0, 0, 0), 0));
        assert_eq!(relay.convert(8, 8, FourCc::ARGB).unwrap().len(), 256);

        relay.ingest(solid_frame(8, 8, (0, 0, 0), 1));
        assert_eq!(relay.convert(2, 6, FourCc::ARGB).unwrap().len(), 48);
    }

    #[test]
    fn test_concurrent_ingest_and_convert() {
        const W: u32 = 32;
        const H: u32 = 24;

        let relay = Arc::new(relay());
        let running = AtomicBool::new(true);
        let produced = AtomicU64::new(0);
        let mut lengths_ok = true;
        let mut converted = 0u64;

        crossbeam::thread::scope(|s| {
            s.spawn(|_| {
                let mut rng = rand::thread_rng();
                let mut id: u16 = 0;
                while running.load(Ordering::Relaxed) {
                    let mut buf = I420Buffer::new(W, H).unwrap();
                    let (y, u, v) = buf.planes_mut();
                    rng.fill(y);
                    rng.fill(u);
                    rng.fill(v);
                    relay.ingest(VideoFrame::new(Arc::new(buf), id));
                    id = id.wrapping_add(1);
                    produced.fetch_add(1, Ordering::Relaxed);
                }
            });

            let deadline = Instant::now() + Duration::from_millis(300);
            while Instant::now() < deadline {
                // Alternate native size and a scaled size
                let (w, h) = if converted % 2 == 0 { (W, H) } else { (W / 2, H * 2) };
                if let Some(view) = relay.convert(w, h, FourCc::ABGR) {
                    lengths_ok &= view.len() == (w * h * 4) as usize;
                    converted += 1;
                }
                let consumed = relay.last_consumed_timestamp();
                lengths_ok &= consumed <= relay.stored_timestamp();
            }
            running.store(false, Ordering::Relaxed);
        })
        .unwrap();

        assert!(lengths_ok);
        assert!(converted > 0);
        let stats = relay.stats();
        assert_eq!(stats.frames_ingested, produced.load(Ordering::Relaxed));
        assert_eq!(stats.conversions, converted);
        assert_eq!(stats.conversion_failures, 0);
        assert!(stats.frames_acquired <= stats.frames_ingested);
    }
}
