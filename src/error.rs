//! Error handling for EPA hourly decoding.
//!
//! Separates per-line decode failures ([`MalformedFieldError`]) from
//! start-up layout problems ([`LayoutError`]) and wraps both, together with
//! file access failures, in the crate-level [`EpaError`].

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hourly data file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Hourly data file has no header line: {path}")]
    MissingHeader { path: PathBuf },

    #[error(transparent)]
    Malformed(#[from] MalformedFieldError),

    #[error("Invalid field layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl EpaError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EpaError>;

/// A field of one line could not be decoded.
///
/// Columns are the documented 1-based inclusive numbers from the format's
/// metadata sheet, not byte offsets.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "malformed field `{field}` (columns {start}-{end}) on {}: {reason} (raw: {raw:?})",
    line_label(.line_number)
)]
pub struct MalformedFieldError {
    pub field: &'static str,
    pub start: u16,
    pub end: u16,
    pub raw: String,
    pub line_number: Option<usize>,
    pub reason: MalformedReason,
}

impl MalformedFieldError {
    /// Attach the caller's line number.
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

fn line_label(line_number: &Option<usize>) -> String {
    match line_number {
        Some(n) => format!("line {n}"),
        None => "unnumbered line".to_string(),
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedReason {
    #[error("line is {actual} bytes long but the field needs {required}")]
    LineTooShort { required: usize, actual: usize },

    #[error("field boundary falls inside a multi-byte character")]
    NotCharBoundary,

    #[error("byte {position} of the line is not valid UTF-8")]
    InvalidUtf8 { position: usize },

    #[error("value is blank")]
    Blank,

    #[error("not an integer: {0}")]
    InvalidInteger(ParseIntError),

    #[error("not a decimal number: {0}")]
    InvalidDecimal(ParseFloatError),

    #[error("only plain base-10 decimals are accepted")]
    UnsupportedDecimalNotation,
}

/// The layout table itself is inconsistent. Reported once, when the layout
/// is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("field `{field}` ends at column {end} before it starts at column {start}")]
    InvertedRange {
        field: &'static str,
        start: u16,
        end: u16,
    },

    #[error("field `{field}` starts at column {start}; documented columns begin at 2")]
    StartBeforeFirstColumn { field: &'static str, start: u16 },

    #[error("field `{second}` (from column {second_start}) overlaps or precedes `{first}` (to column {first_end})")]
    Overlap {
        first: &'static str,
        first_end: u16,
        second: &'static str,
        second_start: u16,
    },

    #[error("field `{field}` has {flag_width} flag characters but only {width} columns")]
    FlagWiderThanField {
        field: &'static str,
        flag_width: u8,
        width: u16,
    },

    #[error("field `{field}` is declared {declared} but the record stores {expected}")]
    KindMismatch {
        field: &'static str,
        declared: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` is declared {declared} but the record expects {expected}")]
    PresenceMismatch {
        field: &'static str,
        declared: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` appears more than once")]
    DuplicateField { field: &'static str },

    #[error("field `{field}` is missing from the layout")]
    MissingField { field: &'static str },
}
