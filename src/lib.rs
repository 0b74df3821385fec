//! Native token-importance explainer for the sexism detection report.
//!
//! Simulates a SHAP-style explanation by matching text against per-language
//! keyword lists and drawing an importance score per match:
//! 1. Keyword scoring (high / medium / sexist-indicator buckets, word fallback)
//! 2. Cumulative-threshold token selection
//! 3. Bold highlighting of the selected tokens
//!
//! No model runs here; the scores only stand in for attributions.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod highlight;
pub mod keywords;
pub mod logging;
pub mod scoring;
pub mod selection;

#[cfg(feature = "python")]
mod python;

pub use analyzer::{AnalysisResult, TokenImportanceAnalyzer};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, ConfigError, KeywordTableError, Result};
pub use highlight::highlight_tokens;
pub use keywords::{KeywordTable, LanguageKeywords};
pub use scoring::{Bucket, MidpointScorer, RandomScorer, Scorer, SeededScorer};
pub use selection::ScoredToken;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python extension module.
#[cfg(feature = "python")]
#[pymodule]
fn sexism_shap_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
