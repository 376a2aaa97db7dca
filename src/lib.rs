//! # LUX Colors
//!
//! Probabilistic color naming over HSV coordinates.
//!
//! A [`Lexicon`] holds a set of named color categories. Each category models
//! hue, saturation and value with a flat "typical" range and heavy Gamma
//! tails outside it, weighted by an availability prior. Given a color the
//! lexicon returns a probability distribution over names instead of a single
//! hard label:
//! - Full ranked posterior over every label
//! - Best label with its unnormalized likelihood
//! - Posterior probability of one named label
//! - Parameter accessors for plotting membership curves
//!
//! ## Example
//!
//! ```rust,no_run
//! use lux_colors::{HsvDatum, Lexicon};
//! use std::path::Path;
//!
//! let lexicon = Lexicon::load(Path::new("data/lux_sample.json"))?;
//! // Hue in degrees, saturation and value in percent
//! let posterior = lexicon.full_posterior(&HsvDatum::new(215.0, 70.0, 80.0))?;
//! for prediction in posterior.iter().take(3) {
//!     println!("{} ({:.3})", prediction.label, prediction.probability);
//! }
//! # Ok::<(), lux_colors::LexiconError>(())
//! ```

pub mod error;
pub mod constants;
pub mod color;
pub mod config;
pub mod model;
pub mod lexicon;

pub use color::{ColorConverter, HsvDatum};
pub use config::{CategoryConfig, DimensionConfig, DimensionsConfig, LexiconConfig, ParamConfig};
pub use error::{LexiconError, Result};
pub use lexicon::{Lexicon, Prediction};
pub use model::{Axis, CategoryModel, DimensionModel, DimensionParams, Region};
