//! Token importance analyzer — the simulated SHAP explainability report.
//!
//! Composes keyword scoring, cumulative selection and highlighting over one
//! immutable keyword table. The analyzer holds no mutable state, so a single
//! instance can be shared across threads; the default scorer draws from the
//! calling thread's RNG.

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, ConfigError, Result};
use crate::highlight::highlight_with_marker;
use crate::keywords::{KeywordTable, LanguageKeywords};
use crate::scoring::{RandomScorer, Scorer};
use crate::selection::{score_tokens, select_by_cumulative, ScoredToken};

/// Report produced by [`TokenImportanceAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub original_text: String,
    /// Selected tokens, highest score first.
    pub important_tokens: Vec<String>,
    pub highlighted_text: String,
    pub language: String,
    pub num_important_tokens: usize,
}

#[derive(Debug, Clone)]
pub struct TokenImportanceAnalyzer {
    table: KeywordTable,
    config: AnalyzerConfig,
}

impl Default for TokenImportanceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenImportanceAnalyzer {
    /// Analyzer over the built-in `en`/`es` table with default settings.
    pub fn new() -> Self {
        Self {
            table: KeywordTable::default(),
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_parts(
        table: KeywordTable,
        config: AnalyzerConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        if table.get(&config.default_language).is_none() {
            return Err(ConfigError::UnknownDefaultLanguage(config.default_language));
        }
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn supported_languages(&self) -> Vec<&str> {
        self.table.languages().collect()
    }

    fn keywords(&self, language: &str) -> Result<&LanguageKeywords> {
        self.table
            .get(language)
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage {
                language: language.to_string(),
                supported: self.supported_languages().join(", "),
            })
    }

    /// Simulated importance scores for `text`, in first-scored order.
    pub fn score_tokens<S: Scorer + ?Sized>(
        &self,
        text: &str,
        language: &str,
        scorer: &mut S,
    ) -> Result<Vec<ScoredToken>> {
        let keywords = self.keywords(language)?;
        Ok(score_tokens(text, keywords, scorer))
    }

    /// Select the most important tokens of `text` with randomly drawn scores.
    pub fn select_important_tokens(
        &self,
        text: &str,
        language: &str,
        threshold: f64,
    ) -> Result<Vec<String>> {
        self.select_important_tokens_with(text, language, threshold, &mut RandomScorer::new())
    }

    /// [`Self::select_important_tokens`] at the configured threshold.
    pub fn select_important_tokens_default(&self, text: &str, language: &str) -> Result<Vec<String>> {
        self.select_important_tokens(text, language, self.config.threshold)
    }

    pub fn select_important_tokens_with<S: Scorer + ?Sized>(
        &self,
        text: &str,
        language: &str,
        threshold: f64,
        scorer: &mut S,
    ) -> Result<Vec<String>> {
        let scored = self.score_tokens(text, language, scorer)?;
        let selected = select_by_cumulative(scored, threshold, self.config.max_tokens);
        tracing::debug!(language, threshold, selected = selected.len(), "selected important tokens");
        Ok(selected)
    }

    /// Wrap each token's word-bounded occurrences in the configured marker.
    pub fn highlight_tokens<S: AsRef<str>>(&self, text: &str, tokens: &[S]) -> String {
        highlight_with_marker(text, tokens, &self.config.emphasis_marker)
    }

    /// Select tokens at the configured threshold and highlight them.
    pub fn analyze(&self, text: &str, language: &str) -> Result<AnalysisResult> {
        self.analyze_with(text, language, &mut RandomScorer::new())
    }

    pub fn analyze_with<S: Scorer + ?Sized>(
        &self,
        text: &str,
        language: &str,
        scorer: &mut S,
    ) -> Result<AnalysisResult> {
        let important_tokens =
            self.select_important_tokens_with(text, language, self.config.threshold, scorer)?;
        let highlighted_text = self.highlight_tokens(text, &important_tokens);

        Ok(AnalysisResult {
            original_text: text.to_string(),
            num_important_tokens: important_tokens.len(),
            important_tokens,
            highlighted_text,
            language: language.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD;
    use crate::scoring::{Bucket, MidpointScorer};

    const FR_PACK: &str = r#"
[fr]
high_importance = ["femmes"]
medium_importance = ["elle"]
sexist_indicators = ["cuisine"]
"#;

    #[test]
    fn test_kitchen_scenario() {
        let analyzer = TokenImportanceAnalyzer::new();
        let text = "You should be in the kitchen, not working";
        let tokens = analyzer
            .select_important_tokens(text, "en", DEFAULT_THRESHOLD)
            .unwrap();
        assert!(tokens.contains(&"kitchen".to_string()));

        let scored = analyzer
            .score_tokens(text, "en", &mut RandomScorer::new())
            .unwrap();
        let kitchen = scored.iter().find(|s| s.token == "kitchen").unwrap();
        assert!(kitchen.score >= 0.7 && kitchen.score < 0.95);
    }

    #[test]
    fn test_empty_text_selects_nothing() {
        let analyzer = TokenImportanceAnalyzer::new();
        assert!(analyzer
            .select_important_tokens("", "en", DEFAULT_THRESHOLD)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fallback_scores_in_low_range() {
        let analyzer = TokenImportanceAnalyzer::new();
        let scored = analyzer
            .score_tokens("xyzzy plugh quux", "en", &mut RandomScorer::new())
            .unwrap();
        assert_eq!(scored.len(), 3);
        for s in &scored {
            assert_eq!(s.bucket, Bucket::Fallback);
            assert!(s.score >= 0.1 && s.score < 0.4);
        }
    }

    #[test]
    fn test_unsupported_language() {
        let analyzer = TokenImportanceAnalyzer::new();
        let err = analyzer
            .select_important_tokens("anything", "fr", DEFAULT_THRESHOLD)
            .unwrap_err();
        assert_eq!(
            err,
            AnalyzerError::UnsupportedLanguage {
                language: "fr".to_string(),
                supported: "en, es".to_string(),
            }
        );
        assert!(analyzer.analyze("anything", "fr").is_err());
        assert_eq!(err.to_string(), "unsupported language 'fr' (supported: en, es)");
    }

    #[test]
    fn test_analyze_with_midpoint_scorer() {
        let analyzer = TokenImportanceAnalyzer::new();
        let text = "She belongs in the kitchen";
        let result = analyzer.analyze_with(text, "en", &mut MidpointScorer).unwrap();

        // kitchen and belong are sexist indicators (0.825), she is medium (0.65)
        assert_eq!(result.important_tokens, vec!["kitchen", "belong", "she"]);
        assert_eq!(result.num_important_tokens, 3);
        assert_eq!(result.original_text, text);
        assert_eq!(result.language, "en");
        // "belong" is not a whole word in "belongs"
        assert_eq!(result.highlighted_text, "**She** belongs in the **kitchen**");
    }

    #[test]
    fn test_analyze_count_matches_tokens() {
        let analyzer = TokenImportanceAnalyzer::new();
        let result = analyzer
            .analyze("Las mujeres deben estar en la cocina", "es")
            .unwrap();
        assert_eq!(result.num_important_tokens, result.important_tokens.len());
        assert!(result.important_tokens.contains(&"mujeres".to_string()));
    }

    #[test]
    fn test_result_serializes() {
        let analyzer = TokenImportanceAnalyzer::new();
        let result = analyzer
            .analyze_with("women", "en", &mut MidpointScorer)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["num_important_tokens"], 2);
        assert_eq!(json["important_tokens"][0], "women");
        assert_eq!(json["highlighted_text"], "**women**");
    }

    #[test]
    fn test_custom_table_and_config() {
        let table = KeywordTable::from_toml_str(FR_PACK).unwrap();
        let config = AnalyzerConfig {
            default_language: "fr".to_string(),
            emphasis_marker: "__".to_string(),
            ..AnalyzerConfig::default()
        };
        let analyzer = TokenImportanceAnalyzer::with_parts(table, config).unwrap();
        assert_eq!(analyzer.supported_languages(), vec!["fr"]);

        let result = analyzer
            .analyze_with("Elle est dans la cuisine", "fr", &mut MidpointScorer)
            .unwrap();
        assert_eq!(result.important_tokens, vec!["cuisine", "elle"]);
        assert_eq!(result.highlighted_text, "__Elle__ est dans la __cuisine__");
        assert!(analyzer.analyze("text", "en").is_err());
    }

    #[test]
    fn test_with_parts_rejects_unknown_default_language() {
        let table = KeywordTable::from_toml_str(FR_PACK).unwrap();
        let err = TokenImportanceAnalyzer::with_parts(table, AnalyzerConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownDefaultLanguage("en".to_string()));
    }

    #[test]
    fn test_max_tokens_cap_from_config() {
        let config = AnalyzerConfig {
            max_tokens: 2,
            ..AnalyzerConfig::default()
        };
        let analyzer = TokenImportanceAnalyzer::with_parts(KeywordTable::default(), config).unwrap();
        let tokens = analyzer
            .select_important_tokens_with(
                "women girls wife pregnant kitchen",
                "en",
                1.0,
                &mut MidpointScorer,
            )
            .unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_default_selection_uses_configured_threshold() {
        let config = AnalyzerConfig {
            threshold: 0.25,
            ..AnalyzerConfig::default()
        };
        let analyzer = TokenImportanceAnalyzer::with_parts(KeywordTable::default(), config).unwrap();
        // the top score is always at least 0.7 of a total no larger than 2.7
        let tokens = analyzer
            .select_important_tokens_default("She belongs in the kitchen", "en")
            .unwrap();
        assert_eq!(tokens.len(), 1);

        let defaults = TokenImportanceAnalyzer::new();
        let tokens = defaults
            .select_important_tokens_default("She belongs in the kitchen", "en")
            .unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_long_fallback_word_is_highlighted() {
        let analyzer = TokenImportanceAnalyzer::new();
        let word = "x".repeat(400_000);
        let result = analyzer.analyze_with(&word, "en", &mut MidpointScorer).unwrap();
        assert_eq!(result.important_tokens, vec![word.clone()]);
        assert_eq!(result.highlighted_text, format!("**{word}**"));
    }
}
