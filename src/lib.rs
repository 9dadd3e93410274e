//! EPA Hourly Decoder Library
//!
//! Decodes fixed-width EPA hourly climate data files into typed records,
//! one [`Hour`] per observed hour.
//!
//! This library provides tools for:
//! - Describing a record line as a validated [`FieldLayout`] of column ranges
//! - Decoding one line into an [`Hour`] with [`FixedWidthRecordDecoder`]
//! - Reading station-year files and discarding their header line
//! - Decoding whole files under a skip or abort [`ErrorPolicy`]
//!
//! ```rust
//! use epa_hourly::FixedWidthRecordDecoder;
//!
//! # fn main() -> epa_hourly::Result<()> {
//! let decoder = FixedWidthRecordDecoder::epa_hourly()?;
//! let line = "1975-01-01 12   544   1327    285A7    402A7    140A7   4   2   -3.9  -12.2   52  100.3  290    6.2    24.1   77777  0  999999999    6   0.061    10    2    0.00  ";
//!
//! let hour = decoder.decode(line)?;
//! assert_eq!(hour.hour, 12);
//! assert_eq!(hour.dry_bulb_temp_c, -3.9);
//! assert!(hour.daily.is_none());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod models;
pub mod reader;
pub mod stats;

// Line decoding service
pub mod app {
    pub mod services {
        pub mod decoder;
    }
}

// Re-export commonly used types
pub use app::services::decoder::FixedWidthRecordDecoder;
pub use batch::{BatchDecoder, DecodeResult, ErrorPolicy};
pub use config::DecodeConfig;
pub use error::{EpaError, LayoutError, MalformedFieldError, MalformedReason, Result};
pub use layout::{FieldKind, FieldLayout, FieldSpec, Presence};
pub use models::{DailyEvaporation, Hour, HourField};
pub use reader::HourlyFile;
pub use stats::DecodeStats;
