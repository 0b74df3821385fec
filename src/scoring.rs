//! Importance scoring — simulated SHAP values drawn per keyword bucket.
//!
//! Scores are not attributions: each matched token gets a value drawn
//! uniformly from the range of the list it matched. The draw is behind the
//! [`Scorer`] trait so callers can swap in a seeded or fixed strategy.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Which keyword list a token was scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    HighImportance,
    MediumImportance,
    SexistIndicator,
    Fallback,
}

impl Bucket {
    /// Half-open score range `[lo, hi)` for this bucket.
    pub const fn range(self) -> (f64, f64) {
        match self {
            Bucket::HighImportance => (0.8, 1.0),
            Bucket::MediumImportance => (0.5, 0.8),
            Bucket::SexistIndicator => (0.7, 0.95),
            Bucket::Fallback => (0.1, 0.4),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Bucket::HighImportance => "high_importance",
            Bucket::MediumImportance => "medium_importance",
            Bucket::SexistIndicator => "sexist_indicators",
            Bucket::Fallback => "fallback",
        }
    }
}

/// Strategy that assigns an importance score to a token in a bucket.
pub trait Scorer {
    fn score(&mut self, bucket: Bucket) -> f64;
}

/// Uniform draw from the bucket range using any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomScorer<R = ThreadRng> {
    rng: R,
}

/// Reproducible scorer: the same seed yields the same scores.
pub type SeededScorer = RandomScorer<StdRng>;

impl RandomScorer<ThreadRng> {
    /// Scorer backed by the calling thread's generator.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomScorer<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomScorer<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomScorer<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Scorer for RandomScorer<R> {
    fn score(&mut self, bucket: Bucket) -> f64 {
        let (lo, hi) = bucket.range();
        self.rng.gen_range(lo..hi)
    }
}

/// Deterministic scorer returning the midpoint of each bucket range.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointScorer;

impl Scorer for MidpointScorer {
    fn score(&mut self, bucket: Bucket) -> f64 {
        let (lo, hi) = bucket.range();
        (lo + hi) / 2.0
    }
}
