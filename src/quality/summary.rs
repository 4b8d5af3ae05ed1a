use crate::types::{EnrichedDevice, WeeklyAverageEntry};

/// Single cut used for summary counts, separate from the bucket ladder.
pub const SUMMARY_THRESHOLD: f64 = 10.0;

pub fn is_above_average(average_measurement: f64) -> bool {
    average_measurement > SUMMARY_THRESHOLD
}

/// Above/below counts over a weekly average series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklySummary {
    pub above: usize,
    pub below_or_equal: usize,
}

impl WeeklySummary {
    pub fn from_entries(entries: &[WeeklyAverageEntry]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut acc, entry| {
                if is_above_average(entry.average_measurement) {
                    acc.above += 1;
                } else {
                    acc.below_or_equal += 1;
                }
                acc
            })
    }
}

/// Counts over an enriched device list, as shown on the home screen header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub total: usize,
    pub connected: usize,
    pub above: usize,
    pub below_or_equal: usize,
}

impl ListSummary {
    pub fn from_devices(devices: &[EnrichedDevice]) -> Self {
        devices.iter().fold(Self::default(), |mut acc, enriched| {
            acc.total += 1;
            if enriched.device.connected {
                acc.connected += 1;
            }
            if is_above_average(enriched.measurement.average_measurement) {
                acc.above += 1;
            } else {
                acc.below_or_equal += 1;
            }
            acc
        })
    }
}
