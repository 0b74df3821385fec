//! Keyword table — per-language keyword lists that drive token scoring.
//!
//! The built-in table covers `en` and `es`. Further language packs load
//! from TOML and can be merged over it:
//!
//! ```toml
//! [fr]
//! high_importance = ["femmes"]
//! medium_importance = ["elle"]
//! sexist_indicators = ["cuisine"]
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::KeywordTableError;
use crate::scoring::Bucket;

// ── Built-in keyword lists ──────────────────────────────────────────

static EN_HIGH_IMPORTANCE: &[&str] = &[
    "slut", "women", "girls", "fem", "wife", "scholar", "woman",
    "onde", "ches", "teaching", "stitute", "pregnant", "gang",
    "men", "biggest", "bl", "girl", "bit", "pen", "financial",
];

static EN_MEDIUM_IMPORTANCE: &[&str] = &[
    "feminist", "periods", "pro", "her", "ok", "she", "boys",
    "ti", "like", "mbo", "ips", "ts", "coverage", "really",
    "wife", "dies", "finger", "trophy", "dressed",
];

static EN_SEXIST_INDICATORS: &[&str] = &[
    "kitchen", "belong", "emotional", "weak", "stupid", "makeup",
    "dress", "hysteric", "irrational", "shopping", "gossip",
    "moody", "sensitive", "drivers", "protect",
];

static ES_HIGH_IMPORTANCE: &[&str] = &[
    "nar", "masculino", "prend", "mach", "zo", "mujeres", "mans",
    "señor", "feminist", "mujer", "lab", "vas", "hombre", "mach",
    "dama", "tu", "bia", "od", "sexual", "fem",
];

static ES_MEDIUM_IMPORTANCE: &[&str] = &[
    "femenino", "doctor", "princesa", "nen", "masculin", "mujeres",
    "niña", "bella", "ton", "niños", "ment", "novi", "apa",
    "ones", "ios", "var", "novia", "bian", "golf",
];

static ES_SEXIST_INDICATORS: &[&str] = &[
    "cocina", "emocionales", "débil", "estúpida", "maquillaje",
    "histérica", "irracional", "compras", "sensibles", "conductoras",
    "proteger", "servir", "natural", "amargadas",
];

static BUILTIN: Lazy<KeywordTable> = Lazy::new(|| {
    let mut languages = BTreeMap::new();
    languages.insert(
        "en".to_string(),
        LanguageKeywords::from_static(EN_HIGH_IMPORTANCE, EN_MEDIUM_IMPORTANCE, EN_SEXIST_INDICATORS),
    );
    languages.insert(
        "es".to_string(),
        LanguageKeywords::from_static(ES_HIGH_IMPORTANCE, ES_MEDIUM_IMPORTANCE, ES_SEXIST_INDICATORS),
    );
    KeywordTable { languages }
});

// ── Table types ─────────────────────────────────────────────────────

/// The three ordered keyword lists of one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageKeywords {
    pub high_importance: Vec<String>,
    pub medium_importance: Vec<String>,
    pub sexist_indicators: Vec<String>,
}

impl LanguageKeywords {
    fn from_static(high: &[&str], medium: &[&str], sexist: &[&str]) -> Self {
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|kw| kw.to_string()).collect() };
        Self {
            high_importance: owned(high),
            medium_importance: owned(medium),
            sexist_indicators: owned(sexist),
        }
    }

    /// Lists in scoring order, each tagged with the bucket it scores under.
    pub fn buckets(&self) -> [(Bucket, &[String]); 3] {
        [
            (Bucket::HighImportance, self.high_importance.as_slice()),
            (Bucket::MediumImportance, self.medium_importance.as_slice()),
            (Bucket::SexistIndicator, self.sexist_indicators.as_slice()),
        ]
    }

    fn validate(&self, language: &str) -> Result<(), KeywordTableError> {
        for (_, list) in self.buckets() {
            if let Some(bad) = list
                .iter()
                .find(|kw| kw.is_empty() || kw.to_lowercase() != **kw)
            {
                return Err(KeywordTableError::InvalidKeyword {
                    language: language.to_string(),
                    keyword: bad.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable mapping from language code to its keyword lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    languages: BTreeMap<String, LanguageKeywords>,
}

impl KeywordTable {
    /// The compiled-in `en`/`es` table.
    pub fn builtin() -> &'static KeywordTable {
        &BUILTIN
    }

    pub fn from_languages(
        languages: BTreeMap<String, LanguageKeywords>,
    ) -> Result<Self, KeywordTableError> {
        if languages.is_empty() {
            return Err(KeywordTableError::Empty);
        }
        for (language, keywords) in &languages {
            keywords.validate(language)?;
        }
        Ok(Self { languages })
    }

    /// Parse a language pack. Every language must define all three lists.
    pub fn from_toml_str(source: &str) -> Result<Self, KeywordTableError> {
        let languages: BTreeMap<String, LanguageKeywords> = toml::from_str(source)?;
        Self::from_languages(languages)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KeywordTableError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| KeywordTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), languages = table.languages.len(), "loaded keyword table");
        Ok(table)
    }

    /// Overlay `other` on this table; a language present in both takes `other`'s lists.
    pub fn merge(mut self, other: KeywordTable) -> Self {
        self.languages.extend(other.languages);
        self
    }

    pub fn get(&self, language: &str) -> Option<&LanguageKeywords> {
        self.languages.get(language)
    }

    /// Supported language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
