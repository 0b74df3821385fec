//! Analyzer configuration.

use crate::error::ConfigError;
use crate::highlight::DEFAULT_MARKER;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_THRESHOLD: f64 = 0.95;
pub const DEFAULT_MAX_TOKENS: usize = 10;

/// Tunables for [`crate::TokenImportanceAnalyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Language used by the bindings when the caller gives none.
    pub default_language: String,
    /// Cumulative score share at which selection stops.
    pub threshold: f64,
    /// Hard cap on selected tokens.
    pub max_tokens: usize,
    pub emphasis_marker: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            threshold: DEFAULT_THRESHOLD,
            max_tokens: DEFAULT_MAX_TOKENS,
            emphasis_marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if self.emphasis_marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(())
    }
}
