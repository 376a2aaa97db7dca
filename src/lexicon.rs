//! Posterior computation over a lexicon of color categories
//!
//! Every query evaluates each category's unnormalized likelihood
//! (`availability * phi_h * phi_s * phi_v`) and, where a probability is
//! requested, divides by the sum over all categories.
//!
//! Algorithm tag: `algo-lux-posterior`

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::HsvDatum;
use crate::config::LexiconConfig;
use crate::model::{Axis, CategoryModel};
use crate::{LexiconError, Result};

/// A label paired with its likelihood or posterior probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub probability: f64,
}

/// An immutable set of color categories keyed by name
///
/// Categories iterate in lexicographic label order, which fixes the order of
/// tied probabilities in [`Lexicon::full_posterior`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: BTreeMap<String, CategoryModel>,
}

impl Lexicon {
    /// Load a lexicon from a configuration file (`.xml` legacy or JSON)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the resource is missing, malformed
    /// or incomplete, or if any category fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let config = LexiconConfig::from_file(path)?;
        let lexicon = Self::from_config(&config)?;
        tracing::debug!(
            path = %path.display(),
            categories = lexicon.len(),
            "loaded color lexicon"
        );
        Ok(lexicon)
    }

    /// Build a lexicon from an already-parsed configuration
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        Self::from_categories(
            config
                .categories
                .iter()
                .map(|category| category.build())
                .collect::<Result<Vec<_>>>()?,
        )
    }

    /// Build a lexicon from category models
    ///
    /// # Errors
    ///
    /// `DuplicateCategory` if two models share a name, `EmptyLexicon` if
    /// there are none.
    pub fn from_categories(models: impl IntoIterator<Item = CategoryModel>) -> Result<Self> {
        let mut categories = BTreeMap::new();
        for model in models {
            match categories.entry(model.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(LexiconError::DuplicateCategory {
                        name: entry.key().clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(model);
                }
            }
        }
        if categories.is_empty() {
            return Err(LexiconError::EmptyLexicon);
        }
        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false for a constructed lexicon
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.categories.contains_key(label)
    }

    /// Category labels in lexicographic order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category(&self, label: &str) -> Option<&CategoryModel> {
        self.categories.get(label)
    }

    fn lookup(&self, label: &str) -> Result<&CategoryModel> {
        self.categories
            .get(label)
            .ok_or_else(|| LexiconError::OutOfVocabulary {
                label: label.to_string(),
            })
    }

    fn likelihoods(&self, datum: &HsvDatum) -> Result<Vec<Prediction>> {
        if !datum.is_finite() {
            return Err(LexiconError::invalid("datum", datum));
        }
        Ok(self
            .categories
            .values()
            .map(|category| Prediction {
                label: category.name().to_string(),
                probability: category.likelihood(datum),
            })
            .collect())
    }

    fn normalizer(&self, datum: &HsvDatum, likelihoods: &[Prediction]) -> Result<f64> {
        let total: f64 = likelihoods.iter().map(|p| p.probability).sum();
        if total > 0.0 && total.is_finite() {
            Ok(total)
        } else {
            tracing::warn!(%datum, total, "no category assigns positive likelihood");
            Err(LexiconError::DegenerateLikelihood {
                hue: datum.hue,
                saturation: datum.saturation,
                value: datum.value,
            })
        }
    }

    /// Posterior over every label, ordered by decreasing probability
    ///
    /// Probabilities sum to one. Ties keep lexicographic label order.
    ///
    /// # Arguments
    ///
    /// * `datum` - Query coordinate (hue in degrees, saturation/value in percent)
    ///
    /// # Returns
    ///
    /// One [`Prediction`] per category, most probable first
    ///
    /// # Errors
    ///
    /// `DegenerateLikelihood` if every category's likelihood is zero,
    /// `InvalidParameter` for a non-finite datum.
    pub fn full_posterior(&self, datum: &HsvDatum) -> Result<Vec<Prediction>> {
        let mut posterior = self.likelihoods(datum)?;
        let total = self.normalizer(datum, &posterior)?;
        for prediction in &mut posterior {
            prediction.probability /= total;
        }
        posterior.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(posterior)
    }

    /// The `n` most probable labels
    ///
    /// # Arguments
    ///
    /// * `datum` - Query coordinate
    /// * `n` - Maximum number of labels; larger values return every label
    ///
    /// # Returns
    ///
    /// The first `n` entries of [`Lexicon::full_posterior`]
    pub fn top_n(&self, datum: &HsvDatum, n: usize) -> Result<Vec<Prediction>> {
        let mut posterior = self.full_posterior(datum)?;
        posterior.truncate(n);
        Ok(posterior)
    }

    /// Label with the greatest likelihood
    ///
    /// The returned value is the unnormalized likelihood, not a probability;
    /// use [`Lexicon::posterior_likelihood`] or [`Lexicon::full_posterior`]
    /// for normalized values.
    ///
    /// # Arguments
    ///
    /// * `datum` - Query coordinate
    ///
    /// # Returns
    ///
    /// The winning label and its likelihood; ties go to the first label in
    /// lexicographic order
    pub fn predict(&self, datum: &HsvDatum) -> Result<Prediction> {
        self.likelihoods(datum)?
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.probability > best.probability {
                    candidate
                } else {
                    best
                }
            })
            .ok_or(LexiconError::EmptyLexicon)
    }

    /// Posterior probability of one label
    ///
    /// # Arguments
    ///
    /// * `datum` - Query coordinate
    /// * `label` - Category name
    ///
    /// # Returns
    ///
    /// The label's likelihood divided by the sum over all categories
    ///
    /// # Errors
    ///
    /// `OutOfVocabulary` if `label` is not in the lexicon.
    pub fn posterior_likelihood(&self, datum: &HsvDatum, label: &str) -> Result<f64> {
        let category = self.lookup(label)?;
        let likelihoods = self.likelihoods(datum)?;
        let total = self.normalizer(datum, &likelihoods)?;
        Ok(category.likelihood(datum) / total)
    }

    /// The six shape parameters of each axis, in `[hue, saturation, value]` order
    ///
    /// # Returns
    ///
    /// Per axis: `[mu_lower, shape_lower, scale_lower, mu_upper, shape_upper, scale_upper]`
    ///
    /// # Errors
    ///
    /// `OutOfVocabulary` if `label` is not in the lexicon.
    pub fn get_params(&self, label: &str) -> Result<[[f64; 6]; 3]> {
        let category = self.lookup(label)?;
        Ok(Axis::ALL.map(|axis| category.dimension(axis).params().to_array()))
    }

    /// Standard deviations of the shape parameters, laid out like [`Lexicon::get_params`]
    ///
    /// # Errors
    ///
    /// `OutOfVocabulary` if `label` is not in the lexicon.
    pub fn get_stdevs(&self, label: &str) -> Result<[[f64; 6]; 3]> {
        let category = self.lookup(label)?;
        Ok(Axis::ALL.map(|axis| category.dimension(axis).stdevs().to_array()))
    }

    /// Whether the label's hue is evaluated on the circle
    pub fn get_adj(&self, label: &str) -> Result<bool> {
        Ok(self.lookup(label)?.hue_adjust())
    }

    /// The label's availability prior
    ///
    /// # Errors
    ///
    /// `OutOfVocabulary` if `label` is not in the lexicon.
    pub fn get_availability(&self, label: &str) -> Result<f64> {
        Ok(self.lookup(label)?.availability())
    }
}
