//! Joint (three-axis) model of one color category

use crate::color::HsvDatum;
use crate::model::{Axis, DimensionModel};
use crate::{LexiconError, Result};

/// A named color category: one membership curve per axis plus a prior weight
#[derive(Debug, Clone)]
pub struct CategoryModel {
    name: String,
    availability: f64,
    dimensions: [DimensionModel; 3],
}

impl CategoryModel {
    /// Create a category from its dimensions in `[hue, saturation, value]` order
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::InvalidParameter` unless `availability` is a
    /// positive finite number.
    pub fn new(
        name: impl Into<String>,
        availability: f64,
        dimensions: [DimensionModel; 3],
    ) -> Result<Self> {
        let name = name.into();
        if !(availability > 0.0 && availability.is_finite()) {
            return Err(LexiconError::invalid(format!("{}.availability", name), availability));
        }
        Ok(Self {
            name,
            availability,
            dimensions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative base-rate weight (not itself a probability)
    pub fn availability(&self) -> f64 {
        self.availability
    }

    pub fn dimension(&self, axis: Axis) -> &DimensionModel {
        &self.dimensions[axis.index()]
    }

    pub fn dimensions(&self) -> &[DimensionModel; 3] {
        &self.dimensions
    }

    /// Whether hue is evaluated on the circle
    pub fn hue_adjust(&self) -> bool {
        self.dimension(Axis::Hue).circular_adjust()
    }

    /// Product of the three per-axis memberships, without the prior
    pub fn phi(&self, datum: &HsvDatum) -> f64 {
        self.dimension(Axis::Hue).phi(datum.hue)
            * self.dimension(Axis::Saturation).phi(datum.saturation)
            * self.dimension(Axis::Value).phi(datum.value)
    }

    /// Unnormalized likelihood: `availability * phi(datum)`
    pub fn likelihood(&self, datum: &HsvDatum) -> f64 {
        self.phi(datum) * self.availability
    }
}
