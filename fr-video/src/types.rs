//! Format tags and colorspace enumerations

use std::fmt;

/// FourCC-style pixel format tag
///
/// Packed the same way libyuv packs its tags: first character in the low
/// byte. Tags are external configuration; only some map to a
/// [`PackedLayout`] this crate can write.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub u32);

impl FourCc {
    pub const ARGB: FourCc = FourCc::from_bytes(*b"ARGB");
    pub const BGRA: FourCc = FourCc::from_bytes(*b"BGRA");
    pub const ABGR: FourCc = FourCc::from_bytes(*b"ABGR");
    pub const RGBA: FourCc = FourCc::from_bytes(*b"RGBA");
    pub const I420: FourCc = FourCc::from_bytes(*b"I420");

    pub const fn from_bytes(tag: [u8; 4]) -> Self {
        FourCc(
            tag[0] as u32 | (tag[1] as u32) << 8 | (tag[2] as u32) << 16 | (tag[3] as u32) << 24,
        )
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Packed layout for this tag, if it is one the converter writes
    pub fn layout(self) -> Option<PackedLayout> {
        match self {
            FourCc::ARGB => Some(PackedLayout::Argb),
            FourCc::BGRA => Some(PackedLayout::Bgra),
            FourCc::ABGR => Some(PackedLayout::Abgr),
            FourCc::RGBA => Some(PackedLayout::Rgba),
            _ => None,
        }
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic()) {
            write!(f, "FourCc({})", String::from_utf8_lossy(&bytes))
        } else {
            write!(f, "FourCc({:#010x})", self.0)
        }
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Packed 32-bit pixel layouts
///
/// Named after the little-endian word, so `Argb` is stored B,G,R,A in memory.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedLayout {
    Argb = 0, // memory: B G R A
    Bgra = 1, // memory: A R G B
    Abgr = 2, // memory: R G B A
    Rgba = 3, // memory: A B G R
}

/// Byte offset of each channel inside one packed pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsets {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    pub a: usize,
}

impl PackedLayout {
    pub const ALL: [PackedLayout; 4] = [
        PackedLayout::Argb,
        PackedLayout::Bgra,
        PackedLayout::Abgr,
        PackedLayout::Rgba,
    ];

    pub fn fourcc(self) -> FourCc {
        match self {
            PackedLayout::Argb => FourCc::ARGB,
            PackedLayout::Bgra => FourCc::BGRA,
            PackedLayout::Abgr => FourCc::ABGR,
            PackedLayout::Rgba => FourCc::RGBA,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        4
    }

    pub fn offsets(self) -> ChannelOffsets {
        match self {
            PackedLayout::Argb => ChannelOffsets { r: 2, g: 1, b: 0, a: 3 },
            PackedLayout::Bgra => ChannelOffsets { r: 1, g: 2, b: 3, a: 0 },
            PackedLayout::Abgr => ChannelOffsets { r: 0, g: 1, b: 2, a: 3 },
            PackedLayout::Rgba => ChannelOffsets { r: 3, g: 2, b: 1, a: 0 },
        }
    }

    /// Pack one pixel
    #[inline(always)]
    pub fn pack(self, r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
        match self {
            PackedLayout::Argb => [b, g, r, a],
            PackedLayout::Bgra => [a, r, g, b],
            PackedLayout::Abgr => [r, g, b, a],
            PackedLayout::Rgba => [a, b, g, r],
        }
    }

    /// Unpack one pixel into (r, g, b, a)
    pub fn unpack(self, px: [u8; 4]) -> (u8, u8, u8, u8) {
        let o = self.offsets();
        (px[o.r], px[o.g], px[o.b], px[o.a])
    }
}

/// Colorspace enumeration
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Bt601 = 1, // SD
    Bt709 = 2, // HD
}

/// Color range enumeration
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRange {
    #[default]
    Partial = 1, // Limited range (16-235)
    Full = 2,    // Full range (0-255)
}
