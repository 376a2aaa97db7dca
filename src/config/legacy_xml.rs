//! Reader for legacy LUX XML documents.
//!
//! Layout:
//!
//! ```xml
//! <lux>
//!   <label name="red" availability="1.2" hue_adjust="True">
//!     <hue>
//!       <mulower value="-10.1" stdev="0.4"/>
//!       ... five more parameter elements ...
//!     </hue>
//!     <saturation>...</saturation>
//!     <value>...</value>
//!   </label>
//! </lux>
//! ```
//!
//! Dimension elements are taken in document order. When a dimension's tag
//! names an axis it must sit at that axis' position.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{CategoryConfig, DimensionConfig, DimensionsConfig, LexiconConfig, ParamConfig};
use crate::constants::tags::{AVAILABILITY, HUE_ADJUST, NAME, PARAM_NAMES, STDEV, VALUE};
use crate::model::Axis;
use crate::{LexiconError, Result};

const ROOT_DEPTH: usize = 0;
const CATEGORY_DEPTH: usize = 1;
const DIMENSION_DEPTH: usize = 2;
const PARAM_DEPTH: usize = 3;

struct PendingCategory {
    name: String,
    availability: f64,
    hue_adjust: bool,
    dimensions: Vec<(String, DimensionConfig)>,
}

struct PendingDimension {
    tag: String,
    params: HashMap<String, ParamConfig>,
}

#[derive(Default)]
struct LegacyParser {
    saw_root: bool,
    categories: Vec<CategoryConfig>,
    category: Option<PendingCategory>,
    dimension: Option<PendingDimension>,
}

pub(super) fn parse(content: &str) -> Result<LexiconConfig> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut parser = LegacyParser::default();
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            LexiconError::config_parse(format!("XML error near byte {}", reader.buffer_position()), e)
        })?;
        match event {
            Event::Start(element) => {
                parser.open(&element, depth)?;
                depth += 1;
            }
            Event::Empty(element) => {
                parser.open(&element, depth)?;
                parser.close(depth)?;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                parser.close(depth)?;
            }
            Event::Text(_) | Event::CData(_) if depth == ROOT_DEPTH => {
                return Err(LexiconError::ConfigParse {
                    message: format!("text outside the document element near byte {}", reader.buffer_position()),
                    source: None,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !parser.saw_root || depth != 0 {
        return Err(LexiconError::ConfigParse {
            message: "XML document is empty or truncated".to_string(),
            source: None,
        });
    }

    tracing::debug!(categories = parser.categories.len(), "parsed legacy LUX XML");
    Ok(LexiconConfig {
        categories: parser.categories,
    })
}

impl LegacyParser {
    fn open(&mut self, element: &BytesStart<'_>, depth: usize) -> Result<()> {
        match depth {
            ROOT_DEPTH => {
                if self.saw_root {
                    return Err(LexiconError::ConfigParse {
                        message: "junk after document element".to_string(),
                        source: None,
                    });
                }
                self.saw_root = true;
            }
            CATEGORY_DEPTH => {
                let name = required(element, NAME, "category")?;
                let availability = number(
                    &required(element, AVAILABILITY, &name)?,
                    &format!("{}.{}", name, AVAILABILITY),
                )?;
                let hue_adjust = literal_bool(
                    &required(element, HUE_ADJUST, &name)?,
                    &format!("{}.{}", name, HUE_ADJUST),
                )?;
                self.category = Some(PendingCategory {
                    name,
                    availability,
                    hue_adjust,
                    dimensions: Vec::with_capacity(3),
                });
            }
            DIMENSION_DEPTH => {
                self.dimension = Some(PendingDimension {
                    tag: tag_name(element),
                    params: HashMap::new(),
                });
            }
            PARAM_DEPTH => {
                let tag = tag_name(element);
                if !PARAM_NAMES.contains(&tag.as_str()) {
                    tracing::debug!(%tag, "ignoring unknown parameter element");
                    return Ok(());
                }
                let context = self.dimension_context();
                let value = number(&required(element, VALUE, &context)?, &format!("{}.{}", context, tag))?;
                let stdev = number(&required(element, STDEV, &context)?, &format!("{}.{}", context, tag))?;
                if let Some(dimension) = self.dimension.as_mut() {
                    dimension.params.insert(tag, ParamConfig { value, stdev });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, depth: usize) -> Result<()> {
        match depth {
            CATEGORY_DEPTH => {
                if let Some(category) = self.category.take() {
                    self.categories.push(finish_category(category)?);
                }
            }
            DIMENSION_DEPTH => {
                let context = self.dimension_context();
                if let (Some(dimension), Some(category)) = (self.dimension.take(), self.category.as_mut()) {
                    let config = DimensionConfig::from_tagged(&context, &dimension.params)?;
                    category.dimensions.push((dimension.tag, config));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn dimension_context(&self) -> String {
        let category = self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("?");
        let position = self.category.as_ref().map(|c| c.dimensions.len()).unwrap_or(0);
        let axis = Axis::ALL.get(position).map(|a| a.name()).unwrap_or("extra");
        format!("{}/{}", category, axis)
    }
}

fn finish_category(category: PendingCategory) -> Result<CategoryConfig> {
    let PendingCategory {
        name,
        availability,
        hue_adjust,
        dimensions,
    } = category;

    if dimensions.len() > Axis::ALL.len() {
        return Err(LexiconError::invalid(
            format!("{}.dimensions", name),
            format!("{} dimension elements, expected 3", dimensions.len()),
        ));
    }
    if let Some(missing) = Axis::ALL.get(dimensions.len()) {
        return Err(LexiconError::missing(&name, missing.name()));
    }

    for (position, (tag, _)) in dimensions.iter().enumerate() {
        if let Some(axis) = Axis::from_name(tag) {
            if axis.index() != position {
                return Err(LexiconError::AxisMismatch {
                    category: name,
                    position,
                    found: tag.clone(),
                });
            }
        }
    }

    let mut configs = dimensions.into_iter().map(|(_, config)| config);
    let (Some(hue), Some(saturation), Some(value)) = (configs.next(), configs.next(), configs.next()) else {
        return Err(LexiconError::missing(&name, "dimensions"));
    };

    Ok(CategoryConfig {
        name,
        availability,
        hue_adjust,
        dimensions: DimensionsConfig {
            hue,
            saturation,
            value,
        },
    })
}

fn tag_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn required(element: &BytesStart<'_>, key: &str, context: &str) -> Result<String> {
    let attribute = element
        .try_get_attribute(key)
        .map_err(|e| LexiconError::config_parse(format!("bad attribute in {}", context), e))?
        .ok_or_else(|| LexiconError::missing(context, key))?;
    attribute
        .unescape_value()
        .map(|value| value.into_owned())
        .map_err(|e| LexiconError::config_parse(format!("bad attribute '{}' in {}", key, context), e))
}

fn number(raw: &str, parameter: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LexiconError::invalid(parameter, raw))
}

/// Accepts `true`/`false` in any case; nothing is evaluated
fn literal_bool(raw: &str, parameter: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LexiconError::invalid(parameter, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension_xml(tag: &str, mu_lower: f64, mu_upper: f64) -> String {
        format!(
            r#"<{tag}>
                <mulower value="{mu_lower}" stdev="0.5"/>
                <shapelower value="2.0" stdev="0.1"/>
                <scalelower value="5.0" stdev="0.2"/>
                <muupper value="{mu_upper}" stdev="0.5"/>
                <shapeupper value="2.0" stdev="0.1"/>
                <scaleupper value="5.0" stdev="0.2"/>
            </{tag}>"#
        )
    }

    fn document(tags: [&str; 3], hue_adjust: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
            <lux>
              <label name="red" availability="1.25" hue_adjust="{hue_adjust}">
                {}{}{}
              </label>
            </lux>"#,
            dimension_xml(tags[0], -10.0, 10.0),
            dimension_xml(tags[1], 50.0, 100.0),
            dimension_xml(tags[2], 30.0, 90.0),
        )
    }

    #[test]
    fn test_parse_axis_tagged_document() {
        let config = parse(&document(["hue", "saturation", "value"], "True")).unwrap();
        assert_eq!(config.categories.len(), 1);
        let red = &config.categories[0];
        assert_eq!(red.name, "red");
        assert_eq!(red.availability, 1.25);
        assert!(red.hue_adjust);
        assert_eq!(red.dimensions.hue.mulower, ParamConfig { value: -10.0, stdev: 0.5 });
        assert_eq!(red.dimensions.saturation.params().mu_lower, 50.0);
        assert_eq!(red.dimensions.value.params().mu_upper, 90.0);
    }

    #[test]
    fn test_untagged_dimensions_are_positional() {
        let config = parse(&document(["dim", "dim", "dim"], "False")).unwrap();
        let red = &config.categories[0];
        assert!(!red.hue_adjust);
        assert_eq!(red.dimensions.hue.params().mu_upper, 10.0);
        assert_eq!(red.dimensions.value.params().mu_lower, 30.0);
    }

    #[test]
    fn test_misplaced_axis_rejected() {
        let err = parse(&document(["saturation", "hue", "value"], "True")).unwrap_err();
        match err {
            LexiconError::AxisMismatch { category, position, found } => {
                assert_eq!(category, "red");
                assert_eq!(position, 0);
                assert_eq!(found, "saturation");
            }
            other => panic!("expected AxisMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_hue_adjust_is_not_evaluated() {
        let err = parse(&document(["hue", "saturation", "value"], "1 == 1")).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_parameter_reported() {
        let xml = document(["hue", "saturation", "value"], "True")
            .replacen(r#"<scalelower value="5.0" stdev="0.2"/>"#, "", 1);
        match parse(&xml).unwrap_err() {
            LexiconError::MissingField { context, field } => {
                assert_eq!(context, "red/hue");
                assert_eq!(field, "scalelower");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_dimension_reported() {
        let xml = format!(
            r#"<lux><label name="grey" availability="1" hue_adjust="False">{}{}</label></lux>"#,
            dimension_xml("hue", 0.0, 360.0),
            dimension_xml("saturation", 0.0, 10.0),
        );
        match parse(&xml).unwrap_err() {
            LexiconError::MissingField { context, field } => {
                assert_eq!(context, "grey");
                assert_eq!(field, "value");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_attribute_reported() {
        let xml = document(["hue", "saturation", "value"], "True").replace(r#" availability="1.25""#, "");
        assert!(matches!(parse(&xml), Err(LexiconError::MissingField { .. })));
    }

    #[test]
    fn test_malformed_xml_rejected() {
        assert!(matches!(parse("<lux></label>"), Err(LexiconError::ConfigParse { .. })));
        assert!(matches!(parse("<lux>"), Err(LexiconError::ConfigParse { .. })));
        assert!(matches!(parse(""), Err(LexiconError::ConfigParse { .. })));
    }

    #[test]
    fn test_second_root_rejected() {
        let label = |name: &str| {
            format!(
                r#"<label name="{name}" availability="1" hue_adjust="False">{}{}{}</label>"#,
                dimension_xml("hue", 0.0, 360.0),
                dimension_xml("saturation", 0.0, 10.0),
                dimension_xml("value", 40.0, 60.0),
            )
        };
        let single = format!("<lux>{}</lux>", label("a"));
        assert_eq!(parse(&single).unwrap().categories.len(), 1);

        let twice = format!("<lux>{}</lux><lux>{}</lux>", label("a"), label("b"));
        assert!(matches!(parse(&twice), Err(LexiconError::ConfigParse { .. })));
        assert!(matches!(parse("<lux/><lux/>"), Err(LexiconError::ConfigParse { .. })));
    }

    #[test]
    fn test_text_after_root_rejected() {
        let xml = format!("{}trailing", document(["hue", "saturation", "value"], "True"));
        assert!(matches!(parse(&xml), Err(LexiconError::ConfigParse { .. })));
    }
}
