//! Configuration for decoding runs.
//!
//! Selects which station-year files to decode and how malformed lines are
//! handled. Validation runs once before any file is opened.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::batch::ErrorPolicy;
use crate::constants::{DEFAULT_DATA_ROOT, DEFAULT_MAX_RECORDED_ERRORS};
use crate::error::{EpaError, Result};
use crate::reader::{discover_year_files, hourly_file_path};

/// Which files to decode and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Directory holding one sub-directory per location
    pub data_root: PathBuf,

    /// Location directory name, e.g. `worcester`
    pub location: String,

    /// Station identifier used in file names, e.g. `94746`
    pub station_id: String,

    /// Years to decode, two or four digits
    pub years: Vec<String>,

    /// Decode every year file found for the station instead of `years`
    pub all_years: bool,

    pub error_policy: ErrorPolicy,

    /// Malformed lines kept for reporting per file
    pub max_recorded_errors: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            location: String::new(),
            station_id: String::new(),
            years: Vec::new(),
            all_years: false,
            error_policy: ErrorPolicy::default(),
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

impl DecodeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(EpaError::configuration("location must not be empty"));
        }
        if self.location.contains(['/', '\\']) || self.location == ".." {
            return Err(EpaError::configuration(format!(
                "location '{}' must be a single directory name",
                self.location
            )));
        }
        if self.station_id.is_empty() || !self.station_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(EpaError::configuration(format!(
                "station id '{}' must be numeric",
                self.station_id
            )));
        }
        if !self.all_years && self.years.is_empty() {
            return Err(EpaError::configuration(
                "at least one year is required unless all years are selected",
            ));
        }
        for year in &self.years {
            normalise_year(year)?;
        }
        Ok(())
    }

    /// Paths of the files this configuration selects
    pub fn hourly_file_paths(&self) -> Result<Vec<PathBuf>> {
        let paths = if self.all_years {
            let found = discover_year_files(&self.data_root, &self.location, &self.station_id)?;
            if found.is_empty() {
                return Err(EpaError::configuration(format!(
                    "no hourly files for station {} under {}",
                    self.station_id,
                    self.data_root.join(&self.location).display()
                )));
            }
            found
        } else {
            self.years
                .iter()
                .map(|year| {
                    normalise_year(year).map(|yy| {
                        hourly_file_path(&self.data_root, &self.location, &self.station_id, &yy)
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        debug!("Selected {} hourly files", paths.len());
        Ok(paths)
    }
}

/// Reduce a year to the two digits used in file names
pub fn normalise_year(year: &str) -> Result<String> {
    let year = year.trim();
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(EpaError::configuration(format!("year '{year}' is not numeric")));
    }
    match year.len() {
        2 => Ok(year.to_string()),
        4 => Ok(year[2..].to_string()),
        _ => Err(EpaError::configuration(format!(
            "year '{year}' must have two or four digits"
        ))),
    }
}
