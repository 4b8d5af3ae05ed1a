//! Rotating view over the seven daily averages of a device.

use crate::quality::WeeklySummary;
use crate::types::WeeklyAverageEntry;

pub const DAYS_PER_WEEK: usize = 7;

/// Circular window over a fixed seven-slot series.
///
/// Rotation only moves `start_offset`; the entries themselves are never reordered or copied.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyWindow {
    entries: Vec<WeeklyAverageEntry>,
    start_offset: usize,
}

impl WeeklyWindow {
    /// Entries past the seventh are dropped; a short series leaves the tail slots empty.
    pub fn new(mut entries: Vec<WeeklyAverageEntry>) -> Self {
        entries.truncate(DAYS_PER_WEEK);
        Self {
            entries,
            start_offset: 0,
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Sets the offset, reduced modulo seven.
    pub fn set_start_offset(&mut self, offset: usize) {
        self.start_offset = offset % DAYS_PER_WEEK;
    }

    pub fn next(&mut self) {
        self.start_offset = (self.start_offset + 1) % DAYS_PER_WEEK;
    }

    pub fn previous(&mut self) {
        self.start_offset = (self.start_offset + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK;
    }

    /// Slot indices of the next `count` positions starting at the offset, wrapping around.
    pub fn visible_indices(&self, count: usize) -> Vec<usize> {
        (0..count)
            .map(|i| (self.start_offset + i) % DAYS_PER_WEEK)
            .collect()
    }

    /// The `count` slots starting at the offset; slots with no entry are `None`.
    pub fn visible(&self, count: usize) -> Vec<Option<&WeeklyAverageEntry>> {
        self.visible_indices(count)
            .into_iter()
            .map(|idx| self.entries.get(idx))
            .collect()
    }

    pub fn entries(&self) -> &[WeeklyAverageEntry] {
        &self.entries
    }

    pub fn summary(&self) -> WeeklySummary {
        WeeklySummary::from_entries(&self.entries)
    }
}
