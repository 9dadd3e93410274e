//! Fixed-width record decoder for EPA hourly lines
//!
//! Decoding is a single pass over the [`FieldLayout`]: every field is sliced
//! out of the line, its flag characters are split off, and the value is
//! coerced to the field's kind and written into a fresh [`Hour`].
//!
//! - [`coerce`] - text, integer and decimal conversion of field values
//!
//! ## Usage
//!
//! ```rust
//! use epa_hourly::app::services::decoder::FixedWidthRecordDecoder;
//!
//! # fn example(line: &str) -> epa_hourly::Result<()> {
//! let decoder = FixedWidthRecordDecoder::epa_hourly()?;
//! let hour = decoder.decode(line)?;
//!
//! println!("{} hour {}: {} degC", hour.date, hour.hour, hour.dry_bulb_temp_c);
//! # Ok(())
//! # }
//! ```

pub mod coerce;

#[cfg(test)]
mod tests;

use crate::constants::DAILY_SUMMARY_HOUR;
use crate::error::{LayoutError, MalformedFieldError, MalformedReason};
use crate::layout::{FieldKind, FieldLayout, FieldSpec};
use crate::models::Hour;

/// Stateless decoder turning one record line into one [`Hour`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidthRecordDecoder {
    layout: FieldLayout,
}

impl FixedWidthRecordDecoder {
    pub fn new(layout: FieldLayout) -> Self {
        Self { layout }
    }

    /// Decoder for the documented EPA hourly layout
    pub fn epa_hourly() -> Result<Self, LayoutError> {
        Ok(Self::new(FieldLayout::epa_hourly()?))
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Decode one line.
    ///
    /// Stops at the first field that cannot be decoded; no partially filled
    /// record is ever returned. Daily summary fields are only read when the
    /// line's hour is the summary hour.
    pub fn decode(&self, line: &str) -> Result<Hour, MalformedFieldError> {
        let mut hour = Hour::default();

        for spec in self.layout.always_fields() {
            decode_field(spec, line, &mut hour)?;
        }

        if hour.hour == DAILY_SUMMARY_HOUR {
            for spec in self.layout.summary_fields() {
                decode_field(spec, line, &mut hour)?;
            }
        }

        Ok(hour)
    }

    /// Decode one line, tagging any error with its line number
    pub fn decode_numbered(
        &self,
        line_number: usize,
        line: &str,
    ) -> Result<Hour, MalformedFieldError> {
        self.decode(line).map_err(|e| e.at_line(line_number))
    }

    /// Decode one raw line as read from a file.
    ///
    /// Bytes that are not valid UTF-8 fail the field holding the first of
    /// them with [`MalformedReason::InvalidUtf8`]. Invalid bytes past every
    /// field the line needs are ignored, like any other trailing content.
    pub fn decode_bytes(
        &self,
        line_number: usize,
        line: &[u8],
    ) -> Result<Hour, MalformedFieldError> {
        let position = match std::str::from_utf8(line) {
            Ok(line) => return self.decode_numbered(line_number, line),
            Err(error) => error.valid_up_to(),
        };

        let valid = String::from_utf8_lossy(&line[..position]);
        self.decode(&valid)
            .map_err(|error| match error.reason {
                MalformedReason::LineTooShort { .. } => self.invalid_utf8(line, position, error),
                _ => error,
            })
            .map_err(|e| e.at_line(line_number))
    }

    // The valid prefix ends at the first invalid byte, so the field that ran
    // out of line is the one holding it.
    fn invalid_utf8(
        &self,
        line: &[u8],
        position: usize,
        short: MalformedFieldError,
    ) -> MalformedFieldError {
        match self
            .layout
            .fields()
            .iter()
            .find(|spec| spec.name() == short.field)
        {
            Some(spec) => {
                let range = spec.byte_range();
                let raw = line
                    .get(range.start.min(line.len())..range.end.min(line.len()))
                    .unwrap_or_default();
                spec.malformed(
                    &String::from_utf8_lossy(raw),
                    MalformedReason::InvalidUtf8 { position },
                )
            }
            None => short,
        }
    }
}

fn decode_field(spec: &FieldSpec, line: &str, hour: &mut Hour) -> Result<(), MalformedFieldError> {
    let raw = spec.extract(line)?;

    match spec.kind {
        FieldKind::Text => hour.set_text(spec.field, coerce::text(raw.value)),
        FieldKind::Integer => hour.set_integer(spec.field, coerce::integer(spec, &raw)?),
        FieldKind::Decimal => hour.set_decimal(spec.field, coerce::decimal(spec, &raw)?),
    }

    let flag = raw.flag.trim();
    if !flag.is_empty() {
        hour.push_flag(spec.field, flag);
    }

    Ok(())
}
