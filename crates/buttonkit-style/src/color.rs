//! RGBA colors and the contrast helpers used for legible text.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Brightness above which [`Color::contrast`] darkens instead of lightens.
pub const CONTRAST_THRESHOLD: f32 = 0.65;

/// An RGBA color with straight (non-premultiplied) alpha, components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Hue, saturation, brightness and alpha, all in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Color {
    /// Create a color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from 8-bit RGBA components.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// An opaque gray with all channels set to `white`.
    #[inline]
    pub const fn gray(white: f32) -> Self {
        Self::from_rgb(white, white, white)
    }

    /// Parse a hex string such as `"293440"`, `"#293440"` or `"#29344080"`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = [self.r, self.g, self.b, self.a].map(to_byte);
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Return the same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.a <= 0.0
    }

    /// Perceptual brightness: `(0.5 R + 2.0 G + 0.5 B) / 3`.
    ///
    /// Green is weighted up because the eye is most sensitive to it. A gray
    /// of value `w` has brightness `w`.
    pub fn brightness(&self) -> f32 {
        (self.r * 0.5 + self.g * 2.0 + self.b * 0.5) / 3.0
    }

    /// Decompose into hue, saturation, brightness and alpha.
    pub fn to_hsba(self) -> Hsba {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let hue = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == self.g {
            ((self.b - self.r) / delta + 2.0) / 6.0
        } else {
            ((self.r - self.g) / delta + 4.0) / 6.0
        };
        let saturation = if max <= 0.0 { 0.0 } else { delta / max };

        Hsba {
            hue,
            saturation,
            brightness: max,
            alpha: self.a,
        }
    }

    /// Build a color from HSB components; saturation and brightness are
    /// clamped to 0.0-1.0.
    pub fn from_hsba(hsba: Hsba) -> Self {
        let h = hsba.hue.rem_euclid(1.0) * 6.0;
        let s = hsba.saturation.clamp(0.0, 1.0);
        let v = hsba.brightness.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, hsba.alpha)
    }

    /// A darker or lighter derivative that reads well on top of this color.
    ///
    /// Bright colors (perceptual brightness above [`CONTRAST_THRESHOLD`]) are
    /// darkened, everything else is lightened.
    pub fn contrast(self, intensity: f32) -> Self {
        if self.brightness() > CONTRAST_THRESHOLD {
            self.darker(intensity)
        } else {
            self.lighter(intensity)
        }
    }

    /// Darken: `b' = b (1 - i²)`, `s' = s (1 + i)`.
    pub fn darker(self, intensity: f32) -> Self {
        let hsba = self.to_hsba();
        let brightness = 100.0 * hsba.brightness * (1.0 - intensity.powi(2));
        let saturation = 100.0 * hsba.saturation + intensity * 100.0 * hsba.saturation;

        Self::from_hsba(Hsba {
            saturation: saturation / 100.0,
            brightness: brightness / 100.0,
            ..hsba
        })
    }

    /// Lighten: `b' = b + (1 - b) i 1.2`, `s' = s - s i 1.35 (1 - 0.2 b)`,
    /// both clamped to 0.0-1.0.
    pub fn lighter(self, intensity: f32) -> Self {
        let hsba = self.to_hsba();
        let b = hsba.brightness;
        let s = hsba.saturation;

        let brightness = (100.0 * b + 100.0 * (1.0 - b) * intensity * 1.2).clamp(0.0, 100.0);
        let saturation =
            (100.0 * s - 100.0 * s * intensity * 1.35 * (1.0 - b * 0.20)).clamp(0.0, 100.0);

        Self::from_hsba(Hsba {
            saturation: saturation / 100.0,
            brightness: brightness / 100.0,
            ..hsba
        })
    }

    // Common colors
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
}

fn to_byte(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a hex color such as \"#293440\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Color, E> {
                Color::from_hex(value)
                    .ok_or_else(|| E::custom(format!("invalid hex color '{value}'")))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn hex_parsing() {
        let c = Color::from_hex("#FF0000").unwrap();
        assert_eq!(c, Color::from_rgb(1.0, 0.0, 0.0));

        let c = Color::from_hex("293440").unwrap();
        assert_eq!(c.to_hex(), "#293440");

        let c = Color::from_hex("#00FF0080").unwrap();
        assert!(approx(c.a, 128.0 / 255.0));

        assert!(Color::from_hex("12345").is_none());
        assert!(Color::from_hex("GGGGGG").is_none());
    }

    #[test]
    fn hex_rejects_signs() {
        assert!(Color::from_hex("+1FFFF").is_none());
        assert!(Color::from_hex("#-1FFFF").is_none());
        assert!(Color::from_hex("FF+1FF80").is_none());
    }

    #[test]
    fn brightness_of_gray_is_its_value() {
        assert!(approx(Color::gray(0.8).brightness(), 0.8));
        assert!(approx(Color::WHITE.brightness(), 1.0));
        assert!(approx(Color::BLACK.brightness(), 0.0));
    }

    #[test]
    fn green_weighs_more_than_red() {
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        let green = Color::from_rgb(0.0, 1.0, 0.0);
        assert!(green.brightness() > red.brightness());
        assert!(green.brightness() > CONTRAST_THRESHOLD);
        assert!(red.brightness() < CONTRAST_THRESHOLD);
    }

    #[test]
    fn hsba_roundtrip_for_a_saturated_color() {
        let c = Color::from_rgb8(0x29, 0x34, 0x40);
        let back = Color::from_hsba(c.to_hsba());
        assert!(approx(c.r, back.r) && approx(c.g, back.g) && approx(c.b, back.b));
    }

    #[test]
    fn bright_colors_get_darker() {
        let base = Color::gray(0.8);
        let contrast = base.contrast(0.5);
        assert!(contrast.to_hsba().brightness < base.to_hsba().brightness);
        // b' = 0.8 * (1 - 0.25)
        assert!(approx(contrast.to_hsba().brightness, 0.6));
    }

    #[test]
    fn dark_colors_get_lighter() {
        let base = Color::gray(0.4);
        let contrast = base.contrast(0.5);
        assert!(contrast.to_hsba().brightness > base.to_hsba().brightness);
        // b' = 0.4 + 0.6 * 0.5 * 1.2
        assert!(approx(contrast.to_hsba().brightness, 0.76));
    }

    #[test]
    fn full_intensity_extremes() {
        // Darkening at full intensity drives brightness to zero.
        assert!(approx(Color::WHITE.contrast(1.0).brightness(), 0.0));
        // Lightening at full intensity saturates brightness at one.
        let lighter = Color::from_rgb8(0x29, 0x34, 0x40).contrast(1.0);
        assert!(approx(lighter.to_hsba().brightness, 1.0));
        assert!(lighter.to_hsba().saturation < 0.4);
    }

    #[test]
    fn darker_raises_saturation() {
        let base = Color::from_rgb(0.9, 0.7, 0.7);
        let darker = base.darker(0.5);
        assert!(darker.to_hsba().saturation > base.to_hsba().saturation);
        assert_eq!(darker.a, base.a);
    }

    #[test]
    fn serde_uses_hex_strings() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            color: Color,
        }

        let parsed: Holder = toml::from_str("color = \"#FB0002\"").unwrap();
        assert_eq!(parsed.color, Color::from_rgb8(0xFB, 0x00, 0x02));

        let text = toml::to_string(&parsed).unwrap();
        assert!(text.contains("#FB0002"));

        assert!(toml::from_str::<Holder>("color = \"nope\"").is_err());
    }
}
