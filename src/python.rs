//! Python bindings — drop-in replacements for the analyzer's Python methods.

use once_cell::sync::Lazy;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::analyzer::{AnalysisResult, TokenImportanceAnalyzer};
use crate::error::{AnalyzerError, KeywordTableError};
use crate::highlight::highlight_with_marker;
use crate::logging::init_tracing;
use crate::scoring::RandomScorer;

// Raised for unknown language codes; a KeyError subclass.
pyo3::create_exception!(sexism_shap_core, UnsupportedLanguageError, PyKeyError);

static ANALYZER: Lazy<TokenImportanceAnalyzer> = Lazy::new(TokenImportanceAnalyzer::new);

impl From<AnalyzerError> for PyErr {
    fn from(err: AnalyzerError) -> Self {
        UnsupportedLanguageError::new_err(err.to_string())
    }
}

impl From<KeywordTableError> for PyErr {
    fn from(err: KeywordTableError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn language_or_default(language: Option<&str>) -> &str {
    language.unwrap_or(ANALYZER.config().default_language.as_str())
}

/// Select important tokens from text.
///
/// Parameters
/// ----------
/// text : str
///     Text to explain.
/// language : str | None
///     Keyword table to match against ("en", "es"). Defaults to "en".
/// threshold : float | None
///     Cumulative score share at which selection stops. Defaults to the
///     analyzer's configured threshold (0.95).
/// seed : int | None
///     Seed for reproducible scores; random when omitted.
///
/// Returns
/// -------
/// list[str]
///     Selected tokens, highest score first (at most 10).
#[pyfunction]
#[pyo3(signature = (text, language=None, threshold=None, seed=None))]
pub fn get_important_tokens(
    text: &str,
    language: Option<&str>,
    threshold: Option<f64>,
    seed: Option<u64>,
) -> PyResult<Vec<String>> {
    let language = language_or_default(language);
    let threshold = threshold.unwrap_or(ANALYZER.config().threshold);
    let tokens = match seed {
        Some(seed) => ANALYZER.select_important_tokens_with(
            text,
            language,
            threshold,
            &mut RandomScorer::seeded(seed),
        )?,
        None => ANALYZER.select_important_tokens(text, language, threshold)?,
    };
    Ok(tokens)
}

/// Wrap each important token in `**bold**` markers, keeping original casing.
#[pyfunction]
pub fn highlight_tokens(text: &str, important_tokens: Vec<String>) -> String {
    highlight_with_marker(text, &important_tokens, &ANALYZER.config().emphasis_marker)
}

/// Full explanation of a tweet.
///
/// Returns a dict with keys: original_text, important_tokens,
/// highlighted_text, language, num_important_tokens.
#[pyfunction]
#[pyo3(signature = (text, language=None, seed=None))]
pub fn analyze_tweet(
    py: Python<'_>,
    text: &str,
    language: Option<&str>,
    seed: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let language = language_or_default(language);
    let result = match seed {
        Some(seed) => ANALYZER.analyze_with(text, language, &mut RandomScorer::seeded(seed))?,
        None => ANALYZER.analyze(text, language)?,
    };
    result_to_dict(py, &result)
}

fn result_to_dict(py: Python<'_>, result: &AnalysisResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("original_text", &result.original_text)?;
    dict.set_item("important_tokens", &result.important_tokens)?;
    dict.set_item("highlighted_text", &result.highlighted_text)?;
    dict.set_item("language", &result.language)?;
    dict.set_item("num_important_tokens", result.num_important_tokens)?;
    Ok(dict.unbind())
}

/// Supported language codes, sorted.
#[pyfunction]
pub fn supported_languages() -> Vec<String> {
    ANALYZER
        .supported_languages()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Validate a TOML language pack and return the language codes it defines.
///
/// Raises ValueError when a language misses one of the three lists or
/// holds a non-lowercase keyword.
#[pyfunction]
pub fn validate_keyword_pack(path: &str) -> PyResult<Vec<String>> {
    let table = crate::keywords::KeywordTable::from_path(path)?;
    Ok(table.languages().map(str::to_string).collect())
}

/// Route Rust-side tracing to stderr. Returns False if already initialised.
#[pyfunction]
#[pyo3(signature = (level="warn"))]
pub fn init_logging(level: &str) -> bool {
    init_tracing(level)
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_important_tokens, m)?)?;
    m.add_function(wrap_pyfunction!(highlight_tokens, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_tweet, m)?)?;
    m.add_function(wrap_pyfunction!(supported_languages, m)?)?;
    m.add_function(wrap_pyfunction!(validate_keyword_pack, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    m.add(
        "UnsupportedLanguageError",
        m.py().get_type_bound::<UnsupportedLanguageError>(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_defaults_to_en() {
        assert_eq!(language_or_default(None), "en");
        assert_eq!(language_or_default(Some("es")), "es");
    }

    #[test]
    fn test_seeded_tokens_are_reproducible() {
        let text = "women and girls belong in the kitchen";
        let a = get_important_tokens(text, Some("en"), None, Some(7)).unwrap();
        let b = get_important_tokens(text, Some("en"), None, Some(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_threshold_defaults_to_config() {
        let text = "women and girls belong in the kitchen";
        let implicit = get_important_tokens(text, None, None, Some(11)).unwrap();
        let explicit = get_important_tokens(text, None, Some(0.95), Some(11)).unwrap();
        assert_eq!(implicit, explicit);
        let narrow = get_important_tokens(text, None, Some(0.01), Some(11)).unwrap();
        assert_eq!(narrow.len(), 1);
    }

    #[test]
    fn test_analyze_tweet_dict() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let dict = analyze_tweet(py, "She belongs in the kitchen", None, Some(1)).unwrap();
            let bound = dict.bind(py);
            let count: usize = bound
                .get_item("num_important_tokens")
                .unwrap()
                .unwrap()
                .extract()
                .unwrap();
            let tokens: Vec<String> = bound
                .get_item("important_tokens")
                .unwrap()
                .unwrap()
                .extract()
                .unwrap();
            let language: String = bound.get_item("language").unwrap().unwrap().extract().unwrap();
            assert_eq!(count, tokens.len());
            assert!(tokens.contains(&"kitchen".to_string()));
            assert_eq!(language, "en");
        });
    }

    #[test]
    fn test_unsupported_language_is_key_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let err = get_important_tokens("anything", Some("fr"), Some(0.95), None).unwrap_err();
            assert!(err.is_instance_of::<UnsupportedLanguageError>(py));
            assert!(err.is_instance_of::<PyKeyError>(py));
        });
    }

    #[test]
    fn test_highlight_binding() {
        assert_eq!(
            highlight_tokens("She works in the kitchen", vec!["kitchen".to_string()]),
            "She works in the **kitchen**"
        );
    }
}
