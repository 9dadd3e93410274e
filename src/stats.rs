//! Decoding statistics for batches of hourly lines

use serde::{Deserialize, Serialize};

use crate::constants::SUCCESS_RATE_THRESHOLD;

/// Counts gathered while decoding one or more files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Non-blank data lines encountered (header excluded)
    pub total_lines: usize,

    /// Lines decoded into an hour
    pub hours_decoded: usize,

    /// Decoded hours that were daily summary rows
    pub summary_hours: usize,

    /// Empty or whitespace-only lines passed over
    pub blank_lines: usize,

    /// Malformed lines skipped under the skip policy
    pub lines_skipped: usize,

    /// Files that contributed to these counts
    pub files_decoded: usize,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded lines as a percentage of data lines
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.hours_decoded as f64 / self.total_lines as f64) * 100.0
        }
    }

    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }

    /// Add the counts of another batch
    pub fn merge(&mut self, other: &DecodeStats) {
        self.total_lines += other.total_lines;
        self.hours_decoded += other.hours_decoded;
        self.summary_hours += other.summary_hours;
        self.blank_lines += other.blank_lines;
        self.lines_skipped += other.lines_skipped;
        self.files_decoded += other.files_decoded;
    }
}
