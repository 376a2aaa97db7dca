//! The query coordinate

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::units::{HUE_FULL_TURN, PERCENT_MAX};

/// A color coordinate on the lexicon's scale
///
/// Hue is in degrees `[0, 360)`; saturation and value are percentages
/// `[0, 100]`. Out-of-range hues are accepted and wrap for categories with
/// circular hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvDatum {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl HsvDatum {
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Scale fractional HSV components (each in `[0, 1]`) onto the lexicon's units
    pub fn from_fractions(hue: f64, saturation: f64, value: f64) -> Self {
        Self::new(hue * HUE_FULL_TURN, saturation * PERCENT_MAX, value * PERCENT_MAX)
    }

    pub fn is_finite(&self) -> bool {
        self.hue.is_finite() && self.saturation.is_finite() && self.value.is_finite()
    }
}

impl From<(f64, f64, f64)> for HsvDatum {
    fn from((hue, saturation, value): (f64, f64, f64)) -> Self {
        Self::new(hue, saturation, value)
    }
}

impl fmt::Display for HsvDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H {:.1}° S {:.1}% V {:.1}%", self.hue, self.saturation, self.value)
    }
}
