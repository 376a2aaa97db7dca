//! Color coordinates and conversion module
//!
//! This module defines the HSV coordinate the lexicon is queried with and
//! converts display colors (hex, sRGB) onto the lexicon's units.

pub mod datum;
pub mod conversion;

pub use datum::HsvDatum;
pub use conversion::ColorConverter;
