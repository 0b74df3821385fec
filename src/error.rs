//! Error types for token analysis, keyword-table loading and configuration.

use std::path::PathBuf;

/// Errors surfaced by the analysis operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    #[error("unsupported language '{language}' (supported: {supported})")]
    UnsupportedLanguage { language: String, supported: String },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors raised while loading an external keyword table.
#[derive(Debug, thiserror::Error)]
pub enum KeywordTableError {
    #[error("failed to read keyword table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keyword table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("keyword table defines no languages")]
    Empty,

    #[error("language '{language}': keyword {keyword:?} must be non-empty and lowercase")]
    InvalidKeyword { language: String, keyword: String },
}

/// Errors raised by [`crate::AnalyzerConfig::validate`] and analyzer construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("max_tokens must be at least 1")]
    ZeroMaxTokens,

    #[error("emphasis marker must not be empty")]
    EmptyMarker,

    #[error("default language '{0}' is not in the keyword table")]
    UnknownDefaultLanguage(String),
}
