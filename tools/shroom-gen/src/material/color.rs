//! Linear RGB and HSV colors
//!
//! Channels are floats in `[0, 1]` (hue in degrees). Conversions follow the
//! usual hexcone model.

use serde::{Deserialize, Serialize};

/// Linear RGB color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Hue (degrees), saturation and value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Clamp every channel into `[0, 1]`
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_hsv(self) -> Hsv {
        let Rgb { r, g, b } = self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };
        let h = if h < 0.0 { h + 360.0 } else { h };
        let s = if max == 0.0 { 0.0 } else { delta / max };

        Hsv { h, s, v: max }
    }

    /// 8-bit RGBA with opaque alpha
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            255,
        ]
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(r + m, g + m, b + m).clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(Hsv::new(0.0, 1.0, 1.0).to_rgb(), Rgb::new(1.0, 0.0, 0.0)));
        assert!(close(Hsv::new(120.0, 1.0, 1.0).to_rgb(), Rgb::new(0.0, 1.0, 0.0)));
        assert!(close(Hsv::new(240.0, 1.0, 1.0).to_rgb(), Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(close(Hsv::new(-6.0, 0.5, 0.5).to_rgb(), Hsv::new(354.0, 0.5, 0.5).to_rgb()));
        assert!(close(Hsv::new(370.0, 0.5, 0.5).to_rgb(), Hsv::new(10.0, 0.5, 0.5).to_rgb()));
    }

    #[test]
    fn test_rgb_hsv_round_trip() {
        let c = Rgb::new(1.0, 0.847914, 0.631299);
        assert!(close(c.to_hsv().to_rgb(), c));
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Rgb::new(1.2, -0.1, 0.0).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_lerp_and_gamut() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.25);
        assert!(close(mid, Rgb::grey(0.25)));
        assert!(mid.is_in_gamut());
        assert!(!Rgb::new(1.01, 0.0, 0.0).is_in_gamut());
    }
}
