//! Reading classification.
//!
//! Everything here is pure and total: any `f64`, NaN included, maps to exactly one bucket.

mod summary;

pub use summary::{ListSummary, SUMMARY_THRESHOLD, WeeklySummary, is_above_average};

use serde::{Deserialize, Serialize};

/// Discrete quality bucket of one reading, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityBucket {
    Critical,
    BelowIdeal,
    Ideal,
    AboveIdeal,
    WellAboveIdeal,
    Extreme,
}

/// Inclusive upper bounds of the ladder, lowest first.
const LADDER: [(f64, QualityBucket); 5] = [
    (2.0, QualityBucket::Critical),
    (4.0, QualityBucket::BelowIdeal),
    (8.0, QualityBucket::Ideal),
    (10.0, QualityBucket::AboveIdeal),
    (13.0, QualityBucket::WellAboveIdeal),
];

impl QualityBucket {
    /// Position on the ladder, `0` for [`QualityBucket::Critical`].
    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityBucket::Critical => "Critical",
            QualityBucket::BelowIdeal => "Below ideal",
            QualityBucket::Ideal => "Ideal",
            QualityBucket::AboveIdeal => "Above ideal",
            QualityBucket::WellAboveIdeal => "Well above ideal",
            QualityBucket::Extreme => "Extreme",
        }
    }

    /// Display color as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            QualityBucket::Critical => "#D32F2F",
            QualityBucket::BelowIdeal => "#F57C00",
            QualityBucket::Ideal => "#388E3C",
            QualityBucket::AboveIdeal => "#FBC02D",
            QualityBucket::WellAboveIdeal => "#7B1FA2",
            QualityBucket::Extreme => "#311B92",
        }
    }
}

/// Rounds to the nearest half: `round(x * 2) / 2`.
pub fn round_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}

/// Classifies a raw reading. Values above the last bound, and NaN, are [`QualityBucket::Extreme`].
pub fn classify(reading: f64) -> QualityBucket {
    LADDER
        .iter()
        .find(|(upper, _)| reading <= *upper)
        .map_or(QualityBucket::Extreme, |(_, bucket)| *bucket)
}

/// Classifies after applying [`round_half`], the way readings are shown.
pub fn classify_rounded(reading: f64) -> QualityBucket {
    classify(round_half(reading))
}

/// Buckets of every displayed field of one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub ph: QualityBucket,
    pub temperature: QualityBucket,
    pub turbidity: QualityBucket,
    pub average: QualityBucket,
}

impl QualityReport {
    pub fn from_readings(ph: f64, temperature: f64, turbidity: f64, average: f64) -> Self {
        Self {
            ph: classify_rounded(ph),
            temperature: classify_rounded(temperature),
            turbidity: classify_rounded(turbidity),
            average: classify_rounded(average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_bounds_are_inclusive() {
        assert_eq!(classify(2.0), QualityBucket::Critical);
        assert_eq!(classify(2.0001), QualityBucket::BelowIdeal);
        assert_eq!(classify(4.0), QualityBucket::BelowIdeal);
        assert_eq!(classify(8.0), QualityBucket::Ideal);
        assert_eq!(classify(10.0), QualityBucket::AboveIdeal);
        assert_eq!(classify(13.0), QualityBucket::WellAboveIdeal);
        assert_eq!(classify(13.5), QualityBucket::Extreme);
    }

    #[test]
    fn classify_is_total() {
        for r in [
            f64::NEG_INFINITY,
            -1e9,
            -0.5,
            0.0,
            7.0,
            14.0,
            99.0,
            f64::INFINITY,
            f64::NAN,
            f64::MIN_POSITIVE,
        ] {
            let _ = classify(r);
            let _ = classify_rounded(r);
        }
        assert_eq!(classify(-3.0), QualityBucket::Critical);
        assert_eq!(classify(f64::NAN), QualityBucket::Extreme);
        assert_eq!(classify(f64::INFINITY), QualityBucket::Extreme);
    }

    #[test]
    fn severity_never_decreases_across_the_ladder() {
        let mut previous = classify(-5.0).severity();
        let mut r = -5.0;
        while r <= 20.0 {
            let current = classify(r).severity();
            assert!(current >= previous, "severity dropped at {r}");
            previous = current;
            r += 0.125;
        }
    }

    #[test]
    fn round_half_snaps_to_halves() {
        assert_eq!(round_half(7.24), 7.0);
        assert_eq!(round_half(7.26), 7.5);
        assert_eq!(round_half(7.75), 8.0);
        assert_eq!(round_half(-1.3), -1.5);
    }

    #[test]
    fn round_half_is_idempotent() {
        let mut x = -20.0;
        while x <= 20.0 {
            let once = round_half(x);
            assert_eq!(round_half(once), once, "not idempotent at {x}");
            x += 0.037;
        }
    }

    #[test]
    fn rounding_happens_before_classification() {
        // 2.2 rounds to 2.0 and stays Critical; 2.3 rounds to 2.5.
        assert_eq!(classify_rounded(2.2), QualityBucket::Critical);
        assert_eq!(classify_rounded(2.3), QualityBucket::BelowIdeal);
    }

    #[test]
    fn report_classifies_each_field() {
        let report = QualityReport::from_readings(7.1, 24.0, 1.0, 10.2);
        assert_eq!(report.ph, QualityBucket::Ideal);
        assert_eq!(report.temperature, QualityBucket::Extreme);
        assert_eq!(report.turbidity, QualityBucket::Critical);
        assert_eq!(report.average, QualityBucket::AboveIdeal);
    }
}
