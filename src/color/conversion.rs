//! Color space conversion utilities
//!
//! Provides conversions between display colors and lexicon coordinates:
//! - sRGB to HSV scaled to degrees/percent
//! - HSV coordinates back to sRGB for swatch display
//! - Hex color representation

use palette::{FromColor, Hsv, Srgb};

use crate::color::HsvDatum;
use crate::constants::units::{HUE_FULL_TURN, PERCENT_MAX};
use crate::{LexiconError, Result};

/// Converter between display colors and lexicon coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a converter
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to a lexicon coordinate
    ///
    /// # Arguments
    ///
    /// * `r`, `g`, `b` - RGB values in range [0, 255]
    ///
    /// # Returns
    ///
    /// Hue in degrees, saturation and value in percent
    pub fn rgb_to_datum(&self, r: u8, g: u8, b: u8) -> HsvDatum {
        self.srgb_to_datum(Srgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }

    /// Convert sRGB to a lexicon coordinate
    ///
    /// Hue lands in `[0, 360)`; achromatic colors get hue 0.
    ///
    /// # Arguments
    ///
    /// * `srgb` - sRGB color with channels in [0, 1]
    ///
    /// # Returns
    ///
    /// Lexicon coordinate in degrees/percent
    pub fn srgb_to_datum(&self, srgb: Srgb) -> HsvDatum {
        let hsv: Hsv = Hsv::from_color(srgb);
        HsvDatum::new(
            hsv.hue.into_positive_degrees() as f64 % HUE_FULL_TURN,
            hsv.saturation as f64 * PERCENT_MAX,
            hsv.value as f64 * PERCENT_MAX,
        )
    }

    /// Convert a lexicon coordinate back to sRGB, clamped to gamut
    ///
    /// # Arguments
    ///
    /// * `datum` - Lexicon coordinate; hue is taken modulo 360
    ///
    /// # Returns
    ///
    /// sRGB color with channels in [0, 1]
    pub fn datum_to_srgb(&self, datum: &HsvDatum) -> Srgb {
        let hsv: Hsv = Hsv::new(
            datum.hue.rem_euclid(HUE_FULL_TURN) as f32,
            (datum.saturation / PERCENT_MAX).clamp(0.0, 1.0) as f32,
            (datum.value / PERCENT_MAX).clamp(0.0, 1.0) as f32,
        );
        let srgb: Srgb = Srgb::from_color(hsv);
        Srgb::new(
            srgb.red.clamp(0.0, 1.0),
            srgb.green.clamp(0.0, 1.0),
            srgb.blue.clamp(0.0, 1.0),
        )
    }

    /// Convert sRGB to hexadecimal color string (e.g., "#FF0000")
    pub fn srgb_to_hex(&self, srgb: Srgb) -> String {
        let r = (srgb.red * 255.0).round() as u8;
        let g = (srgb.green * 255.0).round() as u8;
        let b = (srgb.blue * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Parse hexadecimal color string to sRGB
    ///
    /// Accepts "#FF0000" or "FF0000".
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::InvalidParameter` if the string is not six hex digits
    pub fn hex_to_srgb(&self, hex: &str) -> Result<Srgb> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LexiconError::invalid("hex color", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| LexiconError::invalid("hex color", hex))
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;

        Ok(Srgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }

    /// Parse a hex color straight to a lexicon coordinate
    ///
    /// # Arguments
    ///
    /// * `hex` - "#RRGGBB" or "RRGGBB"
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::InvalidParameter` for a malformed hex string
    pub fn hex_to_datum(&self, hex: &str) -> Result<HsvDatum> {
        Ok(self.srgb_to_datum(self.hex_to_srgb(hex)?))
    }
}
