// src/sentiment.rs
//! Sentiment labels and score ranges.
//!
//! Scores are compound polarity values in [-1, 1]. The label is a pure
//! function of the score (`bucket`), and range filters operate on the same
//! scale, so a label and a range never disagree about a row.

use std::fmt;

use crate::config::consts::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SCORE_MAX, SCORE_MIN};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// ≥ 0.05 → Positive, ≤ -0.05 → Negative, else Neutral.
    pub fn bucket(score: f64) -> Sentiment {
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn parse(label: &str) -> Option<Sentiment> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral"  => Some(Sentiment::Neutral),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral  => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn clamp_score(score: f64) -> f64 {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Inclusive `[lo, hi]` interval on the sentiment score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentRange {
    lo: f64,
    hi: f64,
}

impl Default for SentimentRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl SentimentRange {
    pub const FULL: SentimentRange = SentimentRange { lo: SCORE_MIN, hi: SCORE_MAX };

    /// Bounds are clamped into [-1, 1]; `lo > hi` (or NaN) is rejected.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(Error::MalformedFilterRange { lo, hi });
        }
        Ok(Self { lo: clamp_score(lo), hi: clamp_score(hi) })
    }

    /// No validation. A malformed range matches nothing.
    pub fn unchecked(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn lo(&self) -> f64 { self.lo }
    pub fn hi(&self) -> f64 { self.hi }

    pub fn is_malformed(&self) -> bool {
        !(self.lo <= self.hi)
    }

    /// Covers the whole scale: imposes no constraint, rows without a score pass.
    pub fn is_full(&self) -> bool {
        self.lo <= SCORE_MIN && self.hi >= SCORE_MAX
    }

    pub fn contains(&self, score: Option<f64>) -> bool {
        if self.is_malformed() {
            return false;
        }
        if self.is_full() {
            return true;
        }
        match score {
            Some(s) => self.lo <= s && s <= self.hi,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucketing_thresholds_are_inclusive() {
        assert_eq!(Sentiment::bucket(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::bucket(0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::bucket(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::bucket(-0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::bucket(-0.05), Sentiment::Negative);
        assert_eq!(Sentiment::bucket(-1.0), Sentiment::Negative);
    }

    #[test]
    fn bucketing_is_monotonic() {
        let mut prev = Sentiment::bucket(-1.0);
        for i in -100..=100 {
            let cur = Sentiment::bucket(i as f64 / 100.0);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Sentiment::parse(" negative "), Some(Sentiment::Negative));
        assert_eq!(Sentiment::parse("POSITIVE"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("meh"), None);
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(matches!(
            SentimentRange::new(0.5, -0.5),
            Err(Error::MalformedFilterRange { .. })
        ));
        assert!(SentimentRange::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn range_clamps_bounds() {
        let r = SentimentRange::new(-3.0, 0.2).unwrap();
        assert_eq!(r.lo(), -1.0);
        assert_eq!(r.hi(), 0.2);
        assert!(!r.is_full());
        assert!(SentimentRange::new(-2.0, 2.0).unwrap().is_full());
    }

    #[test]
    fn unchecked_malformed_range_matches_nothing() {
        let r = SentimentRange::unchecked(0.5, -0.5);
        assert!(!r.contains(Some(0.0)));
        assert!(!r.contains(None));
    }

    #[test]
    fn missing_score_only_passes_full_range() {
        assert!(SentimentRange::FULL.contains(None));
        assert!(!SentimentRange::new(-1.0, 0.9).unwrap().contains(None));
    }
}
