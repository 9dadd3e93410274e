//! Batch decoding of line sequences.
//!
//! The decoder reports a malformed line and stops; what happens to the rest
//! of the batch is decided here by an [`ErrorPolicy`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_MAX_RECORDED_ERRORS;
use crate::app::services::decoder::FixedWidthRecordDecoder;
use crate::error::{MalformedFieldError, Result};
use crate::models::Hour;
use crate::reader::HourlyFile;
use crate::stats::DecodeStats;

/// What to do when a line fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the failure and continue with the next line
    #[default]
    Skip,
    /// Stop the batch at the first failure
    Abort,
}

/// Decoded hours of a batch, in input order
#[derive(Debug, Clone, Default)]
pub struct DecodeResult {
    pub hours: Vec<Hour>,
    pub stats: DecodeStats,
    /// Skipped lines, up to the configured limit
    pub failures: Vec<MalformedFieldError>,
}

/// Applies an [`ErrorPolicy`] over a sequence of numbered lines
#[derive(Debug, Clone)]
pub struct BatchDecoder<'a> {
    decoder: &'a FixedWidthRecordDecoder,
    policy: ErrorPolicy,
    max_recorded_errors: usize,
}

impl<'a> BatchDecoder<'a> {
    pub fn new(decoder: &'a FixedWidthRecordDecoder, policy: ErrorPolicy) -> Self {
        Self {
            decoder,
            policy,
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }

    /// Limit how many skipped lines are kept in [`DecodeResult::failures`]
    pub fn with_max_recorded_errors(mut self, max_recorded_errors: usize) -> Self {
        self.max_recorded_errors = max_recorded_errors;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Decode numbered lines (header already removed).
    ///
    /// Lines may be text or raw bytes; invalid UTF-8 is a malformed line
    /// like any other. Blank lines are passed over. Under
    /// [`ErrorPolicy::Abort`] the first malformed line is returned as
    /// [`EpaError::Malformed`](crate::EpaError::Malformed). Errors from the
    /// line source itself always end the batch.
    pub fn decode_lines<I, S>(&self, lines: I) -> Result<DecodeResult>
    where
        I: IntoIterator<Item = Result<(usize, S)>>,
        S: AsRef<[u8]>,
    {
        let mut result = DecodeResult::default();

        for line in lines {
            let (line_number, line) = line?;
            let line = line.as_ref();

            if line.trim_ascii().is_empty() {
                debug!("Passing over blank line {}", line_number);
                result.stats.blank_lines += 1;
                continue;
            }

            result.stats.total_lines += 1;
            match self.decoder.decode_bytes(line_number, line) {
                Ok(hour) => {
                    if hour.is_daily_summary() {
                        result.stats.summary_hours += 1;
                    }
                    result.stats.hours_decoded += 1;
                    result.hours.push(hour);
                }
                Err(error) => match self.policy {
                    ErrorPolicy::Abort => return Err(error.into()),
                    ErrorPolicy::Skip => {
                        warn!("Skipping {}", error);
                        result.stats.lines_skipped += 1;
                        if result.failures.len() < self.max_recorded_errors {
                            result.failures.push(error);
                        }
                    }
                },
            }
        }

        Ok(result)
    }

    /// Decode every remaining line of an opened file
    pub fn decode_file(&self, file: HourlyFile) -> Result<DecodeResult> {
        let path = file.path().to_path_buf();
        debug!("Decoding {} with {:?} policy", path.display(), self.policy);

        let mut result = self.decode_lines(file)?;
        result.stats.files_decoded = 1;

        info!(
            "Decoded {} hours from {} lines in {} ({} skipped)",
            result.stats.hours_decoded,
            result.stats.total_lines,
            path.display(),
            result.stats.lines_skipped
        );
        Ok(result)
    }
}
