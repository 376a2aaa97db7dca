//! Single-axis membership model
//!
//! Each color category describes every axis with a flat plateau between two
//! typical bounds and Gamma survival tails outside them:
//!
//! ```text
//! phi(x) = sf_lower(mu_lower - x)   x <  mu_lower
//!          1                        mu_lower <= x <= mu_upper
//!          sf_upper(x - mu_upper)   x >  mu_upper
//! ```
//!
//! Hue may additionally be remapped into (-180, 180] so categories spanning
//! the 0/360 seam (red) are continuous.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Gamma};

use crate::constants::tags::AXIS_NAMES;
use crate::{LexiconError, Result};

/// Coordinate axis of an HSV datum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Hue,
    Saturation,
    Value,
}

impl Axis {
    /// All axes in dimension order
    pub const ALL: [Axis; 3] = [Axis::Hue, Axis::Saturation, Axis::Value];

    /// Position of this axis within a category's dimensions
    pub fn index(self) -> usize {
        match self {
            Axis::Hue => 0,
            Axis::Saturation => 1,
            Axis::Value => 2,
        }
    }

    /// Configuration tag for this axis
    pub fn name(self) -> &'static str {
        AXIS_NAMES[self.index()]
    }

    /// Look up an axis by its configuration tag
    pub fn from_name(name: &str) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Which piece of the membership curve a coordinate falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Below `mu_lower`: lower Gamma tail
    Lower,
    /// Inside `[mu_lower, mu_upper]`: plateau
    Typical,
    /// Above `mu_upper`: upper Gamma tail
    Upper,
}

/// The six shape parameters of one axis, in configuration order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionParams {
    pub mu_lower: f64,
    pub shape_lower: f64,
    pub scale_lower: f64,
    pub mu_upper: f64,
    pub shape_upper: f64,
    pub scale_upper: f64,
}

impl DimensionParams {
    pub fn from_array(values: [f64; 6]) -> Self {
        let [mu_lower, shape_lower, scale_lower, mu_upper, shape_upper, scale_upper] = values;
        Self {
            mu_lower,
            shape_lower,
            scale_lower,
            mu_upper,
            shape_upper,
            scale_upper,
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.mu_lower,
            self.shape_lower,
            self.scale_lower,
            self.mu_upper,
            self.shape_upper,
            self.scale_upper,
        ]
    }
}

/// Remap a hue in degrees into (-180, 180]
pub fn wrap_hue(degrees: f64) -> f64 {
    let radians = degrees.to_radians();
    radians.sin().atan2(radians.cos()).to_degrees()
}

/// Membership curve of one category along one axis
///
/// Immutable once built; the circular flag is fixed at load time.
#[derive(Debug, Clone)]
pub struct DimensionModel {
    params: DimensionParams,
    stdevs: DimensionParams,
    lower_tail: Gamma,
    upper_tail: Gamma,
    circular_adjust: bool,
}

impl DimensionModel {
    /// Build a model from its shape parameters and their uncertainties
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::InvalidParameter` if a Gamma tail has a
    /// non-positive or non-finite shape or scale.
    pub fn new(params: DimensionParams, stdevs: DimensionParams) -> Result<Self> {
        let lower_tail = gamma_tail("shapelower/scalelower", params.shape_lower, params.scale_lower)?;
        let upper_tail = gamma_tail("shapeupper/scaleupper", params.shape_upper, params.scale_upper)?;

        Ok(Self {
            params,
            stdevs,
            lower_tail,
            upper_tail,
            circular_adjust: false,
        })
    }

    /// Enable or disable circular (hue) remapping
    pub fn with_circular_adjust(mut self, circular_adjust: bool) -> Self {
        self.circular_adjust = circular_adjust;
        self
    }

    pub fn params(&self) -> &DimensionParams {
        &self.params
    }

    /// Parameter uncertainties; carried as metadata only
    pub fn stdevs(&self) -> &DimensionParams {
        &self.stdevs
    }

    pub fn circular_adjust(&self) -> bool {
        self.circular_adjust
    }

    /// Coordinate after optional circular remapping
    pub fn adjust(&self, x: f64) -> f64 {
        if self.circular_adjust {
            wrap_hue(x)
        } else {
            x
        }
    }

    /// Region of `x` relative to the typical bounds (after remapping)
    pub fn region(&self, x: f64) -> Region {
        self.region_of(self.adjust(x))
    }

    fn region_of(&self, x: f64) -> Region {
        if x < self.params.mu_lower {
            Region::Lower
        } else if x > self.params.mu_upper {
            Region::Upper
        } else {
            Region::Typical
        }
    }

    /// Membership of `x` along this axis, in [0, 1]
    pub fn phi(&self, x: f64) -> f64 {
        let x = self.adjust(x);
        match self.region_of(x) {
            Region::Lower => self.lower_tail.sf((x - self.params.mu_lower).abs()),
            Region::Typical => 1.0,
            Region::Upper => self.upper_tail.sf((x - self.params.mu_upper).abs()),
        }
    }
}

fn gamma_tail(parameter: &str, shape: f64, scale: f64) -> Result<Gamma> {
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(LexiconError::invalid(parameter, format!("shape {}, scale {}", shape, scale)));
    }
    Gamma::new(shape, 1.0 / scale)
        .map_err(|_| LexiconError::invalid(parameter, format!("shape {}, scale {}", shape, scale)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(values: [f64; 6]) -> DimensionModel {
        DimensionModel::new(DimensionParams::from_array(values), DimensionParams::from_array([0.0; 6]))
            .unwrap()
    }

    #[test]
    fn test_boundaries_are_exactly_one() {
        let dim = model([10.0, 2.0, 5.0, 50.0, 2.0, 5.0]);
        assert_eq!(dim.phi(10.0), 1.0);
        assert_eq!(dim.phi(50.0), 1.0);
        assert_eq!(dim.phi(30.0), 1.0);
    }

    #[test]
    fn test_regions() {
        let dim = model([10.0, 2.0, 5.0, 50.0, 2.0, 5.0]);
        assert_eq!(dim.region(9.999), Region::Lower);
        assert_eq!(dim.region(10.0), Region::Typical);
        assert_eq!(dim.region(50.0), Region::Typical);
        assert_eq!(dim.region(50.001), Region::Upper);
        assert_eq!(dim.region(0.0), Region::Lower);
        assert_eq!(dim.region(60.0), Region::Upper);
    }

    #[test]
    fn test_exponential_tails() {
        // shape 1 reduces the Gamma survival function to exp(-d / scale)
        let dim = model([10.0, 1.0, 5.0, 50.0, 1.0, 10.0]);
        assert!((dim.phi(5.0) - (-1.0f64).exp()).abs() < 1e-9);
        assert!((dim.phi(70.0) - (-2.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_tails_decay_monotonically() {
        let dim = model([10.0, 2.0, 5.0, 50.0, 3.0, 4.0]);
        let lower: Vec<f64> = [9.0, 5.0, 0.0, -20.0].iter().map(|&x| dim.phi(x)).collect();
        let upper: Vec<f64> = [51.0, 60.0, 75.0, 100.0].iter().map(|&x| dim.phi(x)).collect();
        assert!(lower.windows(2).all(|w| w[0] > w[1]));
        assert!(upper.windows(2).all(|w| w[0] > w[1]));
        assert!(lower.iter().chain(upper.iter()).all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_wrap_hue_range() {
        assert!((wrap_hue(350.0) + 10.0).abs() < 1e-9);
        assert!((wrap_hue(10.0) - 10.0).abs() < 1e-9);
        assert!((wrap_hue(180.0) - 180.0).abs() < 1e-9);
        assert!((wrap_hue(-190.0) - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_adjust_bridges_seam() {
        // A red-like hue band straddling 0 degrees
        let red = model([-20.0, 2.0, 5.0, 15.0, 2.0, 5.0]).with_circular_adjust(true);
        assert!(red.circular_adjust());
        assert_eq!(red.phi(350.0), 1.0);
        assert_eq!(red.phi(5.0), 1.0);
        assert!((red.phi(30.0) - red.phi(390.0)).abs() < 1e-12);

        let plain = model([-20.0, 2.0, 5.0, 15.0, 2.0, 5.0]);
        assert!(plain.phi(350.0) < 1e-6);
    }

    #[test]
    fn test_invalid_gamma_rejected() {
        let stdevs = DimensionParams::from_array([0.0; 6]);
        let zero_shape = DimensionParams::from_array([0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let negative_scale = DimensionParams::from_array([0.0, 1.0, 1.0, 1.0, 1.0, -1.0]);
        assert!(matches!(
            DimensionModel::new(zero_shape, stdevs),
            Err(LexiconError::InvalidParameter { .. })
        ));
        assert!(matches!(
            DimensionModel::new(negative_scale, stdevs),
            Err(LexiconError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_axis_names_round_trip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_name(axis.name()), Some(axis));
        }
        assert_eq!(Axis::from_name("dim"), None);
        assert_eq!(Axis::Saturation.to_string(), "saturation");
    }
}
