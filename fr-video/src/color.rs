//! YUV <-> RGB fixed-point matrices (8.8)

use crate::types::{ColorRange, ColorSpace};

/// Coefficients for one YUV->RGB conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YuvMatrix {
    y_offset: i32,
    y_gain: i32,
    v_to_r: i32,
    u_to_g: i32,
    v_to_g: i32,
    u_to_b: i32,
}

impl YuvMatrix {
    pub const BT601_PARTIAL: YuvMatrix = YuvMatrix {
        y_offset: 16,
        y_gain: 298,
        v_to_r: 409,
        u_to_g: 100,
        v_to_g: 208,
        u_to_b: 516,
    };

    pub const BT601_FULL: YuvMatrix = YuvMatrix {
        y_offset: 0,
        y_gain: 256,
        v_to_r: 359,
        u_to_g: 88,
        v_to_g: 183,
        u_to_b: 454,
    };

    pub const BT709_PARTIAL: YuvMatrix = YuvMatrix {
        y_offset: 16,
        y_gain: 298,
        v_to_r: 459,
        u_to_g: 55,
        v_to_g: 136,
        u_to_b: 541,
    };

    pub const BT709_FULL: YuvMatrix = YuvMatrix {
        y_offset: 0,
        y_gain: 256,
        v_to_r: 403,
        u_to_g: 48,
        v_to_g: 120,
        u_to_b: 475,
    };

    pub fn new(space: ColorSpace, range: ColorRange) -> Self {
        match (space, range) {
            (ColorSpace::Bt601, ColorRange::Partial) => Self::BT601_PARTIAL,
            (ColorSpace::Bt601, ColorRange::Full) => Self::BT601_FULL,
            (ColorSpace::Bt709, ColorRange::Partial) => Self::BT709_PARTIAL,
            (ColorSpace::Bt709, ColorRange::Full) => Self::BT709_FULL,
        }
    }

    #[inline(always)]
    pub fn to_rgb(&self, y: u8, u: u8, v: u8) -> (u8, u8, u8) {
        let c = self.y_gain * (y as i32 - self.y_offset) + 128;
        let d = u as i32 - 128;
        let e = v as i32 - 128;

        let r = (c + self.v_to_r * e) >> 8;
        let g = (c - self.u_to_g * d - self.v_to_g * e) >> 8;
        let b = (c + self.u_to_b * d) >> 8;

        (clamp_u8(r), clamp_u8(g), clamp_u8(b))
    }
}

impl Default for YuvMatrix {
    fn default() -> Self {
        Self::BT601_PARTIAL
    }
}

/// BT.601 limited-range RGB -> YUV, used to author test frames
pub fn rgb_to_yuv_bt601(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let y = ((66 * r + 129 * g + 25 * b + 128) >> 8) + 16;
    let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
    let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;
    (clamp_u8(y), clamp_u8(u), clamp_u8(v))
}

#[inline(always)]
fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
