//=========================================================================
// Colors
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Rgb =================================================================

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the color as `0x00RRGGBB`, the pixel layout of [`Surface`](super::Surface).
    pub const fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_pixel(pixel: u32) -> Self {
        Self::new((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
    }

    /// Linear blend towards `other` by `alpha / 255`.
    pub fn blend(self, other: Self, alpha: u8) -> Self {
        let mix = |from: u8, to: u8| -> u8 {
            let a = u32::from(alpha);
            ((u32::from(from) * (255 - a) + u32::from(to) * a + 127) / 255) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_packing() {
        let color = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(color.to_pixel(), 0x0012_3456);
        assert_eq!(Rgb::from_pixel(0x0012_3456), color);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(Rgb::WHITE.blend(Rgb::BLACK, 0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.blend(Rgb::BLACK, 255), Rgb::BLACK);
    }

    #[test]
    fn blend_midpoint() {
        let mid = Rgb::WHITE.blend(Rgb::BLACK, 128);
        assert_eq!(mid, Rgb::new(127, 127, 127));
    }
}
