//! Application constants for the EPA hourly decoder
//!
//! Holds the documented field layout of an hourly record line together with
//! the file naming conventions and defaults used by the reader and CLI.

use crate::layout::{FieldKind, FieldSpec};
use crate::models::HourField;

// =============================================================================
// Record Layout
// =============================================================================

/// Hour value that marks the daily summary row of a day.
pub const DAILY_SUMMARY_HOUR: i32 = 25;

/// Documented layout of one hourly record line.
///
/// Column numbers are copied from the format's metadata sheet (1-based,
/// inclusive). The flag width is the trailing `aN` part of each format
/// descriptor, e.g. `i5,a3` carries three flag characters after the value.
pub const EPA_HOURLY_FIELDS: &[FieldSpec] = &[
    // i4,1x,i2,1x,i2
    FieldSpec::new(HourField::Date, 2, 11, FieldKind::Text, 0),
    // i3
    FieldSpec::new(HourField::Hour, 12, 14, FieldKind::Integer, 0),
    // i5,a1
    FieldSpec::new(HourField::ExtraterrestrialHorizontalRadiation, 16, 21, FieldKind::Integer, 1),
    FieldSpec::new(HourField::ExtraterrestrialDirectNormalRadiation, 23, 28, FieldKind::Integer, 1),
    // i5,a3
    FieldSpec::new(HourField::GlobalHorizontalRadiation, 30, 37, FieldKind::Integer, 3),
    FieldSpec::new(HourField::DirectNormalRadiation, 39, 46, FieldKind::Integer, 3),
    FieldSpec::new(HourField::DiffuseHorizontalRadiation, 48, 55, FieldKind::Integer, 3),
    // i2,a1
    FieldSpec::new(HourField::TotalSkyCover, 57, 59, FieldKind::Integer, 1),
    FieldSpec::new(HourField::OpaqueSkyCover, 61, 63, FieldKind::Integer, 1),
    // f5.1,a1
    FieldSpec::new(HourField::DryBulbTempC, 65, 70, FieldKind::Decimal, 1),
    FieldSpec::new(HourField::DewPointTempC, 72, 77, FieldKind::Decimal, 1),
    // i3,a1
    FieldSpec::new(HourField::RelativeHumidity, 79, 82, FieldKind::Integer, 1),
    // f5.1,a1
    FieldSpec::new(HourField::StationPressureKpa, 84, 89, FieldKind::Decimal, 1),
    // i3,a1
    FieldSpec::new(HourField::WindDirection, 91, 94, FieldKind::Integer, 1),
    // f5.1,a1
    FieldSpec::new(HourField::WindSpeed, 96, 101, FieldKind::Decimal, 1),
    // f6.1,a1
    FieldSpec::new(HourField::HorizontalVisibility, 103, 109, FieldKind::Decimal, 1),
    // i6,a1
    FieldSpec::new(HourField::CeilingHeight, 111, 117, FieldKind::Integer, 1),
    // i1,a1
    FieldSpec::new(HourField::ObservationIndicator, 119, 120, FieldKind::Integer, 1),
    // a9,a1
    FieldSpec::new(HourField::PresentWeather, 122, 131, FieldKind::Text, 1),
    // i3,a1
    FieldSpec::new(HourField::PrecipitableWater, 133, 136, FieldKind::Integer, 1),
    // f6.3,a1
    FieldSpec::new(HourField::BroadbandAerosolOpticalDepth, 138, 144, FieldKind::Decimal, 1),
    // i4,a1
    FieldSpec::new(HourField::SnowDepth, 146, 150, FieldKind::Integer, 1),
    // i3,a1
    FieldSpec::new(HourField::DaysSinceLastSnowfall, 152, 155, FieldKind::Integer, 1),
    // f6.2,a2
    FieldSpec::new(HourField::HourlyPrecipitation, 157, 164, FieldKind::Decimal, 2),
    // f6.2,a1 - daily values, only written on the summary hour
    FieldSpec::new(HourField::EtoFaoShortGrass, 166, 172, FieldKind::Decimal, 1).summary_only(),
    FieldSpec::new(HourField::EpClassAPanEvaporation, 174, 180, FieldKind::Decimal, 1)
        .summary_only(),
];

// =============================================================================
// Files
// =============================================================================

/// Number of header lines (time zone, latitude, ...) ahead of the records
pub const HEADER_LINES: usize = 1;

/// Default root directory holding one sub-directory per location
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Directory under each location that holds the hourly files
pub const HOURLY_DIR_NAME: &str = "hourly";

/// Hourly file names are `w{station}.h{yy}`
pub const HOURLY_FILE_PREFIX: &str = "w";
pub const HOURLY_FILE_EXTENSION_PREFIX: &str = "h";

// =============================================================================
// Batch Decoding
// =============================================================================

/// Malformed lines kept for reporting when the skip policy is active
pub const DEFAULT_MAX_RECORDED_ERRORS: usize = 20;

/// Percentage of decoded lines above which a batch counts as successful
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

/// Records printed by the CLI before the summary
pub const DEFAULT_SHOW_RECORDS: usize = 5;
