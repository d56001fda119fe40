use serde::{Deserialize, Deserializer, Serialize};

use super::super::domain::CandidateRecord;
use super::normalizer::normalize;

pub const DEFAULT_SHORTLIST_THRESHOLD: f64 = 50.0;

/// Shortlist cutoff in percent, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ShortlistThreshold(f64);

impl ShortlistThreshold {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Interpret free-form recruiter input; anything non-numeric counts as zero.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.trim().parse::<f64>().unwrap_or(0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ShortlistThreshold {
    fn default() -> Self {
        Self(DEFAULT_SHORTLIST_THRESHOLD)
    }
}

impl<'de> Deserialize<'de> for ShortlistThreshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

/// Threshold classification used by the Results and Shortlisted views.
///
/// Reads only the score; the backend's own `shortlisted` flag is a separate metric.
pub fn is_shortlisted(candidate: &CandidateRecord, threshold: ShortlistThreshold) -> bool {
    normalize(&candidate.score) >= threshold.value()
}
