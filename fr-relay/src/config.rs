//! Relay configuration

use fr_video::{ColorRange, ColorSpace, YuvMatrix};

/// When the size observer is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeNotify {
    /// On every ingested frame, whether or not the size changed
    #[default]
    EveryFrame,
    /// On the first frame and whenever the dimensions differ from the last
    OnChange,
}

/// Relay configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Write the destination bottom-up relative to the source
    pub flip_vertical: bool,
    pub color_space: ColorSpace,
    pub color_range: ColorRange,
    pub size_notify: SizeNotify,
}

impl RelayConfig {
    pub fn matrix(&self) -> YuvMatrix {
        YuvMatrix::new(self.color_space, self.color_range)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            flip_vertical: true,
            color_space: ColorSpace::Bt601,
            color_range: ColorRange::Partial,
            size_notify: SizeNotify::EveryFrame,
        }
    }
}
