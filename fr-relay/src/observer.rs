//! Frame size notifications

use std::fmt;

/// Stable identity of one relay, assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelayId(pub u32);

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receives the dimensions of ingested frames
///
/// Called synchronously on the producer's thread from inside
/// `FrameRelay::ingest`; implementations must return quickly and must not
/// block, or they stall the decode pipeline.
pub trait FrameSizeObserver: Send + Sync {
    fn on_frame_size(&self, relay: RelayId, width: u32, height: u32);
}

impl<F> FrameSizeObserver for F
where
    F: Fn(RelayId, u32, u32) + Send + Sync,
{
    fn on_frame_size(&self, relay: RelayId, width: u32, height: u32) {
        self(relay, width, height)
    }
}
