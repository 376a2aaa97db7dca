//! Configuration schema for color lexicons.
//!
//! A lexicon is described by one [`CategoryConfig`] per color name, each
//! carrying a prior weight, a circular-hue flag and the six Gamma-tail
//! parameters of every axis. Axes are named explicitly; nothing is inferred
//! from document order.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use lux_colors::LexiconConfig;
//! use std::path::Path;
//!
//! // JSON, the native format
//! let config = LexiconConfig::from_json_file(Path::new("data/lux_sample.json"))?;
//!
//! // Legacy LUX XML documents
//! let legacy = LexiconConfig::from_xml_file(Path::new("lux.xml"))?;
//! # Ok::<(), lux_colors::LexiconError>(())
//! ```

mod legacy_xml;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::tags::PARAM_NAMES;
use crate::model::{Axis, CategoryModel, DimensionModel, DimensionParams};
use crate::{LexiconError, Result};

/// Complete lexicon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    /// One entry per color category; names must be unique
    pub categories: Vec<CategoryConfig>,
}

/// One color category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Unique category label
    pub name: String,

    /// Relative base-rate weight, must be positive
    pub availability: f64,

    /// Evaluate hue on the circle, wrapping at ±180°
    pub hue_adjust: bool,

    /// Per-axis membership parameters
    pub dimensions: DimensionsConfig,
}

/// Membership parameters for all three axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionsConfig {
    pub hue: DimensionConfig,
    pub saturation: DimensionConfig,
    pub value: DimensionConfig,
}

impl DimensionsConfig {
    pub fn get(&self, axis: Axis) -> &DimensionConfig {
        match axis {
            Axis::Hue => &self.hue,
            Axis::Saturation => &self.saturation,
            Axis::Value => &self.value,
        }
    }
}

/// The six parameters of one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    pub mulower: ParamConfig,
    pub shapelower: ParamConfig,
    pub scalelower: ParamConfig,
    pub muupper: ParamConfig,
    pub shapeupper: ParamConfig,
    pub scaleupper: ParamConfig,
}

/// A fitted parameter and its standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
    pub value: f64,
    pub stdev: f64,
}

impl DimensionConfig {
    fn entries(&self) -> [ParamConfig; 6] {
        [
            self.mulower,
            self.shapelower,
            self.scalelower,
            self.muupper,
            self.shapeupper,
            self.scaleupper,
        ]
    }

    /// Fitted values in model order
    pub fn params(&self) -> DimensionParams {
        DimensionParams::from_array(self.entries().map(|p| p.value))
    }

    /// Standard deviations in model order
    pub fn stdevs(&self) -> DimensionParams {
        DimensionParams::from_array(self.entries().map(|p| p.stdev))
    }

    /// Assemble from parameters keyed by tag name
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::MissingField` naming the first absent tag
    pub(crate) fn from_tagged(
        context: &str,
        tagged: &HashMap<String, ParamConfig>,
    ) -> Result<Self> {
        let mut entries = [ParamConfig { value: 0.0, stdev: 0.0 }; 6];
        for (slot, tag) in entries.iter_mut().zip(PARAM_NAMES) {
            *slot = *tagged
                .get(tag)
                .ok_or_else(|| LexiconError::missing(context, tag))?;
        }
        let [mulower, shapelower, scalelower, muupper, shapeupper, scaleupper] = entries;
        Ok(Self {
            mulower,
            shapelower,
            scalelower,
            muupper,
            shapeupper,
            scaleupper,
        })
    }
}

impl CategoryConfig {
    /// Build the runtime model for this category
    ///
    /// # Errors
    ///
    /// Returns `LexiconError::InvalidParameter` for a non-positive
    /// availability or a degenerate Gamma tail
    pub fn build(&self) -> Result<CategoryModel> {
        let dimension = |axis: Axis| -> Result<DimensionModel> {
            let config = self.dimensions.get(axis);
            let params = config.params();
            if params.mu_lower > params.mu_upper {
                tracing::warn!(
                    category = %self.name,
                    %axis,
                    mu_lower = params.mu_lower,
                    mu_upper = params.mu_upper,
                    "typical range is inverted; plateau is empty"
                );
            }
            DimensionModel::new(params, config.stdevs()).map_err(|e| match e {
                LexiconError::InvalidParameter { parameter, value } => LexiconError::InvalidParameter {
                    parameter: format!("{}.{}.{}", self.name, axis, parameter),
                    value,
                },
                other => other,
            })
        };

        let hue = dimension(Axis::Hue)?.with_circular_adjust(self.hue_adjust);
        let saturation = dimension(Axis::Saturation)?;
        let value = dimension(Axis::Value)?;
        CategoryModel::new(self.name.clone(), self.availability, [hue, saturation, value])
    }
}

impl LexiconConfig {
    /// Load configuration, choosing the format by file extension
    ///
    /// `.xml` files are read as legacy LUX documents, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml {
            Self::from_xml_file(path)
        } else {
            Self::from_json_file(path)
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = read_resource(path)?;
        Self::from_json_str(&content).map_err(|e| with_path(e, path))
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| LexiconError::config_parse("invalid JSON", e))
    }

    /// Load configuration from a legacy LUX XML file
    pub fn from_xml_file(path: &Path) -> Result<Self> {
        let content = read_resource(path)?;
        Self::from_xml_str(&content).map_err(|e| with_path(e, path))
    }

    /// Parse configuration from a legacy LUX XML string
    pub fn from_xml_str(content: &str) -> Result<Self> {
        legacy_xml::parse(content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LexiconError::config_parse("serialization failed", e))?;
        std::fs::write(path, json)
            .map_err(|e| LexiconError::config_load(format!("cannot write {}", path.display()), e))
    }
}

fn read_resource(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| LexiconError::config_load(format!("cannot read {}", path.display()), e))
}

fn with_path(error: LexiconError, path: &Path) -> LexiconError {
    match error {
        LexiconError::ConfigParse { message, source } => LexiconError::ConfigParse {
            message: format!("{}: {}", path.display(), message),
            source,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_CATEGORY_JSON: &str = r#"{
        "categories": [{
            "name": "red",
            "availability": 1.5,
            "hue_adjust": true,
            "dimensions": {
                "hue": {
                    "mulower": {"value": -10.0, "stdev": 0.5},
                    "shapelower": {"value": 2.0, "stdev": 0.1},
                    "scalelower": {"value": 4.0, "stdev": 0.2},
                    "muupper": {"value": 8.0, "stdev": 0.5},
                    "shapeupper": {"value": 2.0, "stdev": 0.1},
                    "scaleupper": {"value": 5.0, "stdev": 0.2}
                },
                "saturation": {
                    "mulower": {"value": 60.0, "stdev": 1.0},
                    "shapelower": {"value": 1.5, "stdev": 0.1},
                    "scalelower": {"value": 10.0, "stdev": 0.3},
                    "muupper": {"value": 100.0, "stdev": 0.0},
                    "shapeupper": {"value": 1.0, "stdev": 0.0},
                    "scaleupper": {"value": 1.0, "stdev": 0.0}
                },
                "value": {
                    "mulower": {"value": 40.0, "stdev": 1.0},
                    "shapelower": {"value": 1.5, "stdev": 0.1},
                    "scalelower": {"value": 10.0, "stdev": 0.3},
                    "muupper": {"value": 90.0, "stdev": 1.0},
                    "shapeupper": {"value": 1.0, "stdev": 0.1},
                    "scaleupper": {"value": 8.0, "stdev": 0.3}
                }
            }
        }]
    }"#;

    #[test]
    fn test_parse_json_schema() {
        let config = LexiconConfig::from_json_str(SINGLE_CATEGORY_JSON).unwrap();
        assert_eq!(config.categories.len(), 1);

        let red = &config.categories[0];
        assert_eq!(red.name, "red");
        assert!(red.hue_adjust);
        assert_eq!(red.dimensions.get(Axis::Hue).params().mu_lower, -10.0);
        assert_eq!(red.dimensions.get(Axis::Saturation).stdevs().scale_lower, 0.3);
        assert_eq!(
            red.dimensions.value.params().to_array(),
            [40.0, 1.5, 10.0, 90.0, 1.0, 8.0]
        );
    }

    #[test]
    fn test_build_sets_circular_flag_on_hue_only() {
        let config = LexiconConfig::from_json_str(SINGLE_CATEGORY_JSON).unwrap();
        let red = config.categories[0].build().unwrap();
        assert!(red.dimension(Axis::Hue).circular_adjust());
        assert!(!red.dimension(Axis::Saturation).circular_adjust());
        assert!(!red.dimension(Axis::Value).circular_adjust());
        assert_eq!(red.availability(), 1.5);
    }

    #[test]
    fn test_missing_field_rejected() {
        let without_adjust = SINGLE_CATEGORY_JSON.replace(r#""hue_adjust": true,"#, "");
        let err = LexiconConfig::from_json_str(&without_adjust).unwrap_err();
        assert!(matches!(err, LexiconError::ConfigParse { .. }));
    }

    #[test]
    fn test_unknown_parameter_field_rejected() {
        let extra = SINGLE_CATEGORY_JSON.replace(
            r#""scaleupper": {"value": 8.0, "stdev": 0.3}"#,
            r#""scaleupper": {"value": 8.0, "stdev": 0.3, "stddev": 0.3}"#,
        );
        let err = LexiconConfig::from_json_str(&extra).unwrap_err();
        assert!(matches!(err, LexiconError::ConfigParse { .. }));
    }

    #[test]
    fn test_hue_adjust_must_be_literal_bool() {
        let quoted = SINGLE_CATEGORY_JSON.replace(r#""hue_adjust": true"#, r#""hue_adjust": "True""#);
        assert!(LexiconConfig::from_json_str(&quoted).is_err());
    }

    #[test]
    fn test_build_labels_invalid_parameter() {
        let broken = SINGLE_CATEGORY_JSON.replace(
            r#""scaleupper": {"value": 8.0, "stdev": 0.3}"#,
            r#""scaleupper": {"value": 0.0, "stdev": 0.3}"#,
        );
        let config = LexiconConfig::from_json_str(&broken).unwrap();
        match config.categories[0].build() {
            Err(LexiconError::InvalidParameter { parameter, .. }) => {
                assert!(parameter.starts_with("red.value."), "got {}", parameter);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_from_tagged_reports_missing_tag() {
        let mut tagged = HashMap::new();
        for tag in PARAM_NAMES.iter().filter(|&&tag| tag != "muupper") {
            tagged.insert(tag.to_string(), ParamConfig { value: 1.0, stdev: 0.0 });
        }
        match DimensionConfig::from_tagged("red/hue", &tagged) {
            Err(LexiconError::MissingField { context, field }) => {
                assert_eq!(context, "red/hue");
                assert_eq!(field, "muupper");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
