//! Error types for the lux_colors library

use thiserror::Error;

/// Result type alias for lux_colors operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Error types for lexicon loading and color classification
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Configuration resource could not be read
    #[error("Failed to load lexicon configuration: {message}")]
    ConfigLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration resource is not well-formed JSON or XML
    #[error("Malformed lexicon configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required attribute or child node is absent
    #[error("Missing field '{field}' in {context}")]
    MissingField { context: String, field: String },

    /// An axis-tagged dimension node sits at the wrong position
    #[error("Category '{category}': dimension {position} is tagged '{found}'")]
    AxisMismatch {
        category: String,
        position: usize,
        found: String,
    },

    /// Invalid configuration value or query coordinate
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Two categories share one name
    #[error("Duplicate category name: {name}")]
    DuplicateCategory { name: String },

    /// Configuration defines no categories
    #[error("Lexicon configuration contains no categories")]
    EmptyLexicon,

    /// Label is not part of the lexicon
    #[error("Label '{label}' was not in the lexicon")]
    OutOfVocabulary { label: String },

    /// Every category assigns zero likelihood, so no posterior exists
    #[error("All category likelihoods vanish at (h={hue}, s={saturation}, v={value})")]
    DegenerateLikelihood { hue: f64, saturation: f64, value: f64 },
}

impl LexiconError {
    /// Create a configuration load error with context
    pub fn config_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration parse error with context
    pub fn config_parse<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn missing(context: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            context: context.into(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error arose while building a lexicon (as opposed to querying one)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LexiconError::ConfigLoad { .. }
                | LexiconError::ConfigParse { .. }
                | LexiconError::MissingField { .. }
                | LexiconError::AxisMismatch { .. }
                | LexiconError::DuplicateCategory { .. }
                | LexiconError::EmptyLexicon
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            LexiconError::ConfigLoad { .. } => {
                "Could not read the lexicon file. Please check the path and try again.".to_string()
            }
            LexiconError::ConfigParse { .. } | LexiconError::MissingField { .. } => {
                "The lexicon file is malformed or incomplete.".to_string()
            }
            LexiconError::OutOfVocabulary { label } => {
                format!("'{}' is not a color name known to this lexicon.", label)
            }
            LexiconError::DegenerateLikelihood { .. } => {
                "No color name fits this color at all. Try a different color.".to_string()
            }
            _ => "Color classification failed. Please check the input.".to_string(),
        }
    }
}
