//! Reduction of accepted durations into summary statistics.

use serde::Serialize;
use tally_core::error::{Result, TallyError};
use tally_core::formatting::{format_duration, format_speed_factor};
use tally_core::limits::SPEED_FACTORS;

// ── SpeedAdjusted ─────────────────────────────────────────────────────────────

/// Total duration when watched at a faster playback speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedAdjusted {
    /// Playback-speed multiplier, e.g. `1.5`.
    pub factor: f64,
    /// `ceil(total_seconds / factor)`.
    pub seconds: u64,
    #[serde(skip)]
    numerator: u64,
    #[serde(skip)]
    denominator: u64,
}

impl SpeedAdjusted {
    /// Adjust `total_seconds` for the playback speed `numerator / denominator`.
    ///
    /// Uses integer arithmetic: `ceil(total / (n/d)) == ceil(total * d / n)`.
    pub fn new(total_seconds: u64, numerator: u64, denominator: u64) -> Self {
        let scaled = total_seconds * denominator;
        Self {
            factor: numerator as f64 / denominator as f64,
            seconds: scaled.div_ceil(numerator),
            numerator,
            denominator,
        }
    }

    /// Display label such as `"1.5x"`.
    pub fn label(&self) -> String {
        format_speed_factor(self.numerator, self.denominator)
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Aggregate statistics over a non-empty set of accepted durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_seconds: u64,
    pub count: usize,
    /// `floor(total_seconds / count)`.
    pub average_seconds: u64,
    pub max_seconds: u32,
    /// One entry per configured playback speed, in ascending order.
    pub speed_adjusted: Vec<SpeedAdjusted>,
}

impl Summary {
    /// Zero-padded strings ready for display.
    pub fn formatted(&self) -> FormattedSummary {
        FormattedSummary {
            total: format_duration(self.total_seconds, true),
            speeds: self
                .speed_adjusted
                .iter()
                .map(|s| (s.label(), format_duration(s.seconds, true)))
                .collect(),
            count: self.count,
            average: format_duration(self.average_seconds, false),
            max: format_duration(u64::from(self.max_seconds), false),
        }
    }
}

/// Display form of a [`Summary`].
///
/// Totals always show hours; average and max only when non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSummary {
    pub total: String,
    /// `(label, duration)` pairs such as `("1.5x", "01:30:00")`.
    pub speeds: Vec<(String, String)>,
    pub count: usize,
    pub average: String,
    pub max: String,
}

// ── DurationAggregator ────────────────────────────────────────────────────────

/// Stateless helper that folds accepted durations into a [`Summary`].
pub struct DurationAggregator;

impl DurationAggregator {
    /// Summarise `durations` using the default playback speeds.
    ///
    /// Fails with [`TallyError::NoValidData`] when `durations` is empty.
    pub fn aggregate(durations: &[u32]) -> Result<Summary> {
        Self::aggregate_with_speeds(durations, SPEED_FACTORS)
    }

    /// Summarise `durations`, computing an adjusted total for each
    /// `(numerator, denominator)` speed.
    pub fn aggregate_with_speeds(durations: &[u32], speeds: &[(u64, u64)]) -> Result<Summary> {
        let max_seconds = *durations.iter().max().ok_or(TallyError::NoValidData)?;

        let total_seconds: u64 = durations.iter().map(|&d| u64::from(d)).sum();
        let count = durations.len();
        let average_seconds = total_seconds / count as u64;

        let speed_adjusted = speeds
            .iter()
            .filter(|(n, d)| *n > 0 && *d > 0)
            .map(|&(n, d)| SpeedAdjusted::new(total_seconds, n, d))
            .collect();

        Ok(Summary {
            total_seconds,
            count,
            average_seconds,
            max_seconds,
            speed_adjusted,
        })
    }
}

/// Free-function form of [`DurationAggregator::aggregate`].
pub fn aggregate(durations: &[u32]) -> Result<Summary> {
    DurationAggregator::aggregate(durations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty_fails() {
        let err = aggregate(&[]).unwrap_err();
        assert!(matches!(err, TallyError::NoValidData));
    }

    #[test]
    fn test_aggregate_basic_stats() {
        let summary = aggregate(&[60, 120, 180]).unwrap();
        assert_eq!(summary.total_seconds, 360);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average_seconds, 120);
        assert_eq!(summary.max_seconds, 180);
    }

    #[test]
    fn test_average_is_floored() {
        let summary = aggregate(&[1, 2]).unwrap();
        assert_eq!(summary.average_seconds, 1);
    }

    fn seconds(summary: &Summary) -> Vec<u64> {
        summary.speed_adjusted.iter().map(|s| s.seconds).collect()
    }

    #[test]
    fn test_speed_adjusted_one_hour() {
        let summary = aggregate(&[3600]).unwrap();
        assert_eq!(seconds(&summary), vec![2400, 1800]);
        let f = summary.formatted();
        assert_eq!(
            f.speeds,
            vec![
                ("1.5x".to_string(), "00:40:00".to_string()),
                ("2.0x".to_string(), "00:30:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_speed_adjusted_rounds_up() {
        // 7 / 1.5 = 4.67 → 5; 7 / 2 = 3.5 → 4
        let summary = aggregate(&[7]).unwrap();
        assert_eq!(seconds(&summary), vec![5, 4]);
    }

    #[test]
    fn test_speed_adjusted_factors_in_order() {
        let summary = aggregate(&[60]).unwrap();
        let factors: Vec<f64> = summary.speed_adjusted.iter().map(|s| s.factor).collect();
        assert_eq!(factors, vec![1.5, 2.0]);
    }

    #[test]
    fn test_custom_speeds_skip_zero_factors() {
        let summary = DurationAggregator::aggregate_with_speeds(&[100], &[(0, 1), (5, 4)]).unwrap();
        assert_eq!(summary.speed_adjusted.len(), 1);
        assert_eq!(summary.speed_adjusted[0].seconds, 80);
    }

    #[test]
    fn test_total_does_not_overflow_u32() {
        let durations = vec![86_400u32; 1_000];
        let summary = aggregate(&durations).unwrap();
        assert_eq!(summary.total_seconds, 86_400_000);
        assert_eq!(summary.average_seconds, 86_400);
    }

    #[test]
    fn test_formatted_summary() {
        let summary = aggregate(&[5400, 2700]).unwrap();
        let f = summary.formatted();
        assert_eq!(f.total, "02:15:00");
        assert_eq!(f.count, 2);
        assert_eq!(f.average, "01:07:30");
        assert_eq!(f.max, "01:30:00");
    }

    #[test]
    fn test_formatted_short_average_omits_hours() {
        let f = aggregate(&[60, 120]).unwrap().formatted();
        assert_eq!(f.total, "00:03:00");
        assert_eq!(f.average, "01:30");
        assert_eq!(f.max, "02:00");
    }

    #[test]
    fn test_summary_serializes_without_internal_fields() {
        let json = serde_json::to_value(aggregate(&[3600]).unwrap()).unwrap();
        assert_eq!(json["total_seconds"], 3600);
        assert_eq!(json["speed_adjusted"][0]["factor"], 1.5);
        assert!(json["speed_adjusted"][0].get("numerator").is_none());
    }
}
