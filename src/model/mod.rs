//! Likelihood models for color categories
//!
//! A category's joint likelihood is the product of three independent
//! single-axis membership curves scaled by its availability prior.

pub mod dimension;
pub mod category;

pub use dimension::{wrap_hue, Axis, DimensionModel, DimensionParams, Region};
pub use category::CategoryModel;
