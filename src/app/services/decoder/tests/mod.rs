//! Test fixtures shared by the decoder tests
//!
//! The literal lines below are records of the Worcester 1975 sample file
//! (`tests/data/worcester/hourly/w94746.h75`).

use super::FixedWidthRecordDecoder;


/// Hour 12 of 1975-01-01, flagged radiation values
pub const ORDINARY_LINE: &str = "1975-01-01 12   544   1327    285A7    402A7    140A7   4   2   -3.9  -12.2   52  100.3  290    6.2    24.1   77777  0  999999999    6   0.061    10    2    0.00  ";

/// Daily summary row of 1975-01-01, including the evaporation columns
pub const SUMMARY_LINE: &str = "1975-01-01 25     0      0      0        0        0     8   6   -7.2  -11.7   70  100.9  310    3.6    32.2E  77777  0  999999999    4   0.060    10    2    0.03 T   0.38    0.52 ";

pub fn decoder() -> FixedWidthRecordDecoder {
    FixedWidthRecordDecoder::epa_hourly().unwrap()
}

/// Replace documented columns `start..=end` of `line` with `text`
pub fn overwrite(line: &str, start: u16, end: u16, text: &str) -> String {
    let range = (start as usize - 2)..(end as usize - 1);
    assert_eq!(
        text.len(),
        range.len(),
        "replacement must fill columns {start}-{end}"
    );
    let mut out = line.to_string();
    out.replace_range(range, text);
    out
}
