/*
 * This module contains the `ScorerConfig` struct, which implements the default trait, and its
 * builder. The config is given to the `CorpusScorer` and to the label scorer to simplify their
 * arguments.
*/
use std::fmt::Display;

const DEFAULT_RESULTS_SUBDIR: &str = "results";
const DEFAULT_EXCLUDED_LABEL: &str = "0";

#[derive(Clone, Debug, PartialEq)]
/// Config struct used to simplify the inputs of the scorers. It implements the default trait.
pub struct ScorerConfig {
    /// Minimum probability a predicted entity needs to be considered. Predictions below it are
    /// discarded when the classifier output is read.
    pub(crate) threshold: f64,
    /// Name of the subdirectory where the entities found when processing a directory are written.
    pub(crate) results_subdir: String,
    /// Label left out of the micro-average of the label scorer. It usually stands for "no entity".
    pub(crate) excluded_label: String,
}

impl ScorerConfig {
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn results_subdir(&self) -> &str {
        &self.results_subdir
    }

    pub fn excluded_label(&self) -> &str {
        &self.excluded_label
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            results_subdir: String::from(DEFAULT_RESULTS_SUBDIR),
            excluded_label: String::from(DEFAULT_EXCLUDED_LABEL),
        }
    }
}

impl Display for ScorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Probability threshold: {}\n Results subdirectory: {}\n Label excluded from the micro-average: {}",
            self.threshold, self.results_subdir, self.excluded_label
        )
    }
}

impl From<ScorerConfigBuilder> for ScorerConfig {
    fn from(value: ScorerConfigBuilder) -> Self {
        Self {
            threshold: value.threshold,
            results_subdir: value.results_subdir,
            excluded_label: value.excluded_label,
        }
    }
}

/// This builder can be used to build and customize a `ScorerConfig` structure.
#[derive(Clone, Debug)]
pub struct ScorerConfigBuilder {
    threshold: f64,
    results_subdir: String,
    excluded_label: String,
}

impl Default for ScorerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScorerConfigBuilder {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
    pub fn results_subdir(mut self, results_subdir: impl Into<String>) -> Self {
        self.results_subdir = results_subdir.into();
        self
    }
    pub fn excluded_label(mut self, excluded_label: impl Into<String>) -> Self {
        self.excluded_label = excluded_label.into();
        self
    }
    pub fn new() -> Self {
        let defaults = ScorerConfig::default();
        Self {
            threshold: defaults.threshold,
            results_subdir: defaults.results_subdir,
            excluded_label: defaults.excluded_label,
        }
    }
    pub fn build(self) -> ScorerConfig {
        ScorerConfig::from(self)
    }
}
