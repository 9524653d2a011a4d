//! Canvas colour type and the named palette.
//!
//! Channels are 8-bit sRGB with a separate `0.0 – 1.0` alpha, which is what
//! Canvas2D fill/stroke styles take.  [`Color::to_css`] produces the style
//! string; [`Color::from_css`] (or `str::parse`) reads the two formats the
//! palette helpers hand out.
//!
//! # Example
//! ```rust,ignore
//! use deo_core::Color;
//!
//! let hud   = Color::LIME;
//! let glass = Color::SKY_BLUE.fade(0.4);
//! let mine: Color = "#ff6b6b".parse()?;
//! assert_eq!(glass.to_css(), "rgba(102, 191, 255, 0.4)");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("unsupported colour format: {0:?}")]
    Format(String),
    #[error("colour component out of range in {0:?}")]
    Range(String),
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    // ── Constructors ────────────────────────────────────────────────────────

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse `#rrggbb`, `rgb(r, g, b)` or `transparent`.
    pub fn from_css(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::BLANK);
        }
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorParseError::Format(s.to_string()));
            }
            let v = u32::from_str_radix(hex, 16)
                .map_err(|_| ColorParseError::Format(s.to_string()))?;
            return Ok(Self::from_hex(v));
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ColorParseError::Format(s.to_string()));
            }
            let mut rgb = [0u8; 3];
            for (slot, part) in rgb.iter_mut().zip(&parts) {
                let v: u16 = part
                    .parse()
                    .map_err(|_| ColorParseError::Format(s.to_string()))?;
                *slot = u8::try_from(v).map_err(|_| ColorParseError::Range(s.to_string()))?;
            }
            return Ok(Self::rgb(rgb[0], rgb[1], rgb[2]));
        }
        Err(ColorParseError::Format(s.to_string()))
    }

    // ── Modifiers ───────────────────────────────────────────────────────────

    /// Same colour with alpha replaced by `alpha` clamped to `[0, 1]`.
    pub fn fade(self, alpha: f32) -> Self {
        Self { a: alpha.clamp(0.0, 1.0), ..self }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    // ── Conversions ─────────────────────────────────────────────────────────

    /// Canvas style string: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    // ── Palette ─────────────────────────────────────────────────────────────

    pub const LIGHT_GRAY:  Self = Self::from_hex(0xc8c8c8);
    pub const GRAY:        Self = Self::from_hex(0x828282);
    pub const DARK_GRAY:   Self = Self::from_hex(0x505050);
    pub const COAL:        Self = Self::from_hex(0x101010);
    pub const YELLOW:      Self = Self::from_hex(0xfdf900);
    pub const GOLD:        Self = Self::from_hex(0xffcb00);
    pub const ORANGE:      Self = Self::from_hex(0xffa100);
    pub const PINK:        Self = Self::from_hex(0xff6dc2);
    pub const RED:         Self = Self::from_hex(0xe62937);
    pub const MAROON:      Self = Self::from_hex(0xbe2137);
    pub const GREEN:       Self = Self::from_hex(0x00e430);
    pub const LIME:        Self = Self::from_hex(0x009e2f);
    pub const DARK_GREEN:  Self = Self::from_hex(0x00752c);
    pub const SKY_BLUE:    Self = Self::from_hex(0x66bfff);
    pub const BLUE:        Self = Self::from_hex(0x0079f1);
    pub const DARK_BLUE:   Self = Self::from_hex(0x0052ac);
    pub const PURPLE:      Self = Self::from_hex(0xc87aff);
    pub const CYAN:        Self = Self::from_hex(0x00ffff);
    pub const VIOLET:      Self = Self::from_hex(0x873cbe);
    pub const DARK_PURPLE: Self = Self::from_hex(0x701f7e);
    pub const BEIGE:       Self = Self::from_hex(0xd3b083);
    pub const BROWN:       Self = Self::from_hex(0x7f6a4f);
    pub const DARK_BROWN:  Self = Self::from_hex(0x4c3f2f);
    pub const WHITE:       Self = Self::from_hex(0xffffff);
    pub const BLACK:       Self = Self::from_hex(0x000000);
    pub const MAGENTA:     Self = Self::from_hex(0xff00ff);
    pub const BLANK:       Self = Self::rgba(0, 0, 0, 0.0);
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_css(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
