use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// An opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsv(self) -> Hsv {
        Hsv::from_rgb(self)
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_squared(self, other: Color) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected 6 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in '{0}'")]
    InvalidHex(String),
}

/// Parses `#rrggbb` or `rrggbb` (either case).
pub fn hex_to_rgb(hex: &str) -> Result<Color, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(ColorError::InvalidLength(digits.len()));
    }
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let channel = |start: usize| {
        u8::from_str_radix(&digits[start..start + 2], 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

pub fn rgb_to_hex(color: Color) -> String {
    color.to_string()
}

/// Hue, saturation and value, each normalized to `[0, 1]`; hue is cyclic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn from_rgb(color: Color) -> Self {
        let r = f64::from(color.r) / 255.0;
        let g = f64::from(color.g) / 255.0;
        let b = f64::from(color.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return Self { h: 0.0, s: 0.0, v: max };
        }

        let range = max - min;
        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self {
            h: (h / 6.0).rem_euclid(1.0),
            s: range / max,
            v: max,
        }
    }

    /// Channels are truncated toward zero, not rounded.
    pub fn to_rgb(self) -> Color {
        let Self { h, s, v } = self;
        let (r, g, b) = if s == 0.0 {
            (v, v, v)
        } else {
            let sector = (h * 6.0).trunc();
            let f = h * 6.0 - sector;
            let p = v * (1.0 - s);
            let q = v * (1.0 - s * f);
            let t = v * (1.0 - s * (1.0 - f));
            match (sector as i64).rem_euclid(6) {
                0 => (v, t, p),
                1 => (q, v, p),
                2 => (p, v, t),
                3 => (p, q, v),
                4 => (t, p, v),
                _ => (v, p, q),
            }
        };

        Color::new(truncate_channel(r), truncate_channel(g), truncate_channel(b))
    }

    /// Rotates the hue by `degrees`, wrapping into `[0, 1)`.
    pub fn rotate(self, degrees: f64) -> Self {
        Self {
            h: (self.h + degrees / 360.0).rem_euclid(1.0),
            ..self
        }
    }

    /// Offsets the value, clamped to `[0.1, 0.9]`.
    pub fn with_value_offset(self, delta: f64) -> Self {
        Self {
            v: (self.v + delta).clamp(0.1, 0.9),
            ..self
        }
    }
}

fn truncate_channel(unit: f64) -> u8 {
    (unit * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_to_rgb_accepts_optional_hash_and_mixed_case() {
        assert_eq!(hex_to_rgb("#FF8000"), Ok(Color::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("0a0B0c"), Ok(Color::new(10, 11, 12)));
    }

    #[test]
    fn hex_to_rgb_rejects_short_and_non_hex_input() {
        assert_eq!(hex_to_rgb("#fff"), Err(ColorError::InvalidLength(3)));
        assert_eq!(hex_to_rgb(""), Err(ColorError::InvalidLength(0)));
        assert_eq!(
            hex_to_rgb("#gg0000"),
            Err(ColorError::InvalidHex("#gg0000".to_string()))
        );
        assert!(hex_to_rgb("##ff0000").is_err());
        assert!(hex_to_rgb("#ff00é").is_err());
    }

    #[test]
    fn rgb_to_hex_is_lowercase_and_padded() {
        assert_eq!(rgb_to_hex(Color::new(0, 10, 255)), "#000aff");
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::new(52, 152, 219)).expect("serialize color");
        assert_eq!(json, r##""#3498db""##);
    }

    #[test]
    fn hsv_from_rgb_matches_reference_values() {
        let hsv = Color::new(0x34, 0x98, 0xdb).to_hsv();
        assert!((hsv.h - 0.566_866_267_465_069_9).abs() < 1e-12);
        assert!((hsv.s - 0.762_557_077_625_570_7).abs() < 1e-12);
        assert!((hsv.v - 0.858_823_529_411_764_7).abs() < 1e-12);

        let gray = Color::new(128, 128, 128).to_hsv();
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn hsv_to_rgb_truncates_instead_of_rounding() {
        // 0.5 * 255 = 127.5 and 0.9 * 255 = 229.5; both truncate down.
        let orange = Hsv { h: 1.0 / 12.0, s: 1.0, v: 1.0 };
        assert_eq!(orange.to_rgb(), Color::new(255, 127, 0));

        let dim = Hsv { h: 0.0, s: 1.0, v: 0.9 };
        assert_eq!(dim.to_rgb(), Color::new(229, 0, 0));
    }

    #[test]
    fn rotate_full_turn_restores_hue() {
        let hsv = Color::new(0x34, 0x98, 0xdb).to_hsv();
        let rotated = hsv.rotate(360.0);
        assert!((rotated.h - hsv.h).abs() < 1e-12);

        let chartreuse = Hsv { h: 0.25, s: 1.0, v: 1.0 };
        assert_eq!(chartreuse.rotate(360.0), chartreuse);
        assert_eq!(chartreuse.rotate(360.0).to_rgb(), Color::new(127, 255, 0));
    }

    #[test]
    fn rotate_wraps_negative_offsets() {
        let rotated = Hsv { h: 0.0, s: 1.0, v: 1.0 }.rotate(-90.0);
        assert!((rotated.h - 0.75).abs() < 1e-12);
    }

    #[test]
    fn value_offset_clamps_to_bounds() {
        let dark = Hsv { h: 0.0, s: 0.0, v: 0.05 };
        assert_eq!(dark.with_value_offset(-0.4).v, 0.1);

        let bright = Hsv { h: 0.0, s: 0.0, v: 1.0 };
        assert_eq!(bright.with_value_offset(0.4).v, 0.9);
    }

    proptest! {
        #[test]
        fn hex_round_trips_lowercased(
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
            upper in any::<bool>(),
        ) {
            let hex = format!("#{r:02x}{g:02x}{b:02x}");
            let input = if upper { hex.to_uppercase() } else { hex.clone() };
            let parsed = hex_to_rgb(&input).expect("valid hex");
            prop_assert_eq!(rgb_to_hex(parsed), hex);
        }
    }
}
