//! Fixed-width field layout of an hourly record line.
//!
//! A [`FieldLayout`] is an ordered list of [`FieldSpec`] rows, each mapping a
//! documented column range to one attribute of [`Hour`](crate::models::Hour).
//! The layout is validated once when it is built and is read-only afterwards.
//!
//! ## Column numbering
//!
//! The metadata sheet numbers columns from 1, inclusive at both ends, and
//! every field is preceded by one pad character that the numbering does not
//! count. The byte range of a field is therefore the half-open range
//! `[start - 2, end - 1)`: the pad character is dropped and the documented
//! end column is kept.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::EPA_HOURLY_FIELDS;
use crate::error::{LayoutError, MalformedFieldError, MalformedReason};
use crate::models::HourField;

/// Target type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
        }
    }
}

/// When a field is present in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    /// Written on every line
    Always,
    /// Only written on the daily summary hour
    SummaryHourOnly,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Always => "always",
            Presence::SummaryHourOnly => "summary hour only",
        }
    }
}

/// One row of the layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: HourField,
    /// Documented first column, 1-based inclusive
    pub start: u16,
    /// Documented last column, 1-based inclusive
    pub end: u16,
    pub kind: FieldKind,
    /// Trailing flag characters following the value
    pub flag_width: u8,
    pub presence: Presence,
}

/// Slice of a line belonging to one field, split into value and flag parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub raw: &'a str,
    pub value: &'a str,
    pub flag: &'a str,
}

impl FieldSpec {
    pub const fn new(
        field: HourField,
        start: u16,
        end: u16,
        kind: FieldKind,
        flag_width: u8,
    ) -> Self {
        Self {
            field,
            start,
            end,
            kind,
            flag_width,
            presence: Presence::Always,
        }
    }

    /// Mark the field as written only on the daily summary hour
    pub const fn summary_only(self) -> Self {
        Self {
            presence: Presence::SummaryHourOnly,
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Number of documented columns, flag included
    pub fn width(&self) -> u16 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Zero-based, end-exclusive byte range of the field within a line.
    ///
    /// Columns below the first documented one clamp to byte 0; such a spec
    /// is rejected by [`FieldLayout::new`].
    pub fn byte_range(&self) -> Range<usize> {
        (self.start as usize).saturating_sub(2)..self.required_len()
    }

    /// Shortest line that contains this field
    pub fn required_len(&self) -> usize {
        (self.end as usize).saturating_sub(1)
    }

    /// Slice this field out of `line` and split off its flag characters
    pub fn extract<'a>(&self, line: &'a str) -> Result<RawField<'a>, MalformedFieldError> {
        let range = self.byte_range();
        if line.len() < range.end {
            let available = line.get(range.start.min(line.len())..).unwrap_or_default();
            return Err(self.malformed(
                available,
                MalformedReason::LineTooShort {
                    required: range.end,
                    actual: line.len(),
                },
            ));
        }

        let raw = line
            .get(range)
            .ok_or_else(|| self.malformed("", MalformedReason::NotCharBoundary))?;
        let split = raw.len().saturating_sub(self.flag_width as usize);
        match (raw.get(..split), raw.get(split..)) {
            (Some(value), Some(flag)) => Ok(RawField { raw, value, flag }),
            _ => Err(self.malformed(raw, MalformedReason::NotCharBoundary)),
        }
    }

    pub(crate) fn malformed(&self, raw: &str, reason: MalformedReason) -> MalformedFieldError {
        MalformedFieldError {
            field: self.name(),
            start: self.start,
            end: self.end,
            raw: raw.to_string(),
            line_number: None,
            reason,
        }
    }

    fn check(&self) -> Result<(), LayoutError> {
        if self.start < 2 {
            return Err(LayoutError::StartBeforeFirstColumn {
                field: self.name(),
                start: self.start,
            });
        }
        if self.end < self.start {
            return Err(LayoutError::InvertedRange {
                field: self.name(),
                start: self.start,
                end: self.end,
            });
        }
        if self.flag_width as u16 >= self.width() {
            return Err(LayoutError::FlagWiderThanField {
                field: self.name(),
                flag_width: self.flag_width,
                width: self.width(),
            });
        }
        if self.kind != self.field.kind() {
            return Err(LayoutError::KindMismatch {
                field: self.name(),
                declared: self.kind.as_str(),
                expected: self.field.kind().as_str(),
            });
        }
        if self.presence != self.field.presence() {
            return Err(LayoutError::PresenceMismatch {
                field: self.name(),
                declared: self.presence.as_str(),
                expected: self.field.presence().as_str(),
            });
        }
        Ok(())
    }
}

/// Ordered, validated set of field specs describing one record line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    fields: Vec<FieldSpec>,
}

impl FieldLayout {
    /// Build a layout, checking every spec and the ordering between them
    pub fn new(fields: impl Into<Vec<FieldSpec>>) -> Result<Self, LayoutError> {
        let fields = fields.into();
        let mut seen = HashSet::new();

        for (index, spec) in fields.iter().enumerate() {
            spec.check()?;

            if !seen.insert(spec.field) {
                return Err(LayoutError::DuplicateField { field: spec.name() });
            }

            if let Some(previous) = index.checked_sub(1).map(|i| &fields[i]) {
                if spec.start <= previous.end {
                    return Err(LayoutError::Overlap {
                        first: previous.name(),
                        first_end: previous.end,
                        second: spec.name(),
                        second_start: spec.start,
                    });
                }
            }
        }

        if let Some(missing) = HourField::ALL.iter().find(|field| !seen.contains(*field)) {
            return Err(LayoutError::MissingField {
                field: missing.name(),
            });
        }

        Ok(Self { fields })
    }

    /// The documented EPA hourly layout
    pub fn epa_hourly() -> Result<Self, LayoutError> {
        Self::new(EPA_HOURLY_FIELDS)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, field: HourField) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    /// Fields written on every line, in layout order
    pub fn always_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.with_presence(Presence::Always)
    }

    /// Fields written only on the daily summary hour, in layout order
    pub fn summary_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.with_presence(Presence::SummaryHourOnly)
    }

    fn with_presence(&self, presence: Presence) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(move |spec| spec.presence == presence)
    }

    /// Shortest line an ordinary hour can be decoded from
    pub fn min_line_len(&self) -> usize {
        self.always_fields()
            .map(FieldSpec::required_len)
            .max()
            .unwrap_or(0)
    }

    /// Shortest line a daily summary hour can be decoded from
    pub fn summary_line_len(&self) -> usize {
        self.fields
            .iter()
            .map(FieldSpec::required_len)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epa_specs() -> Vec<FieldSpec> {
        EPA_HOURLY_FIELDS.to_vec()
    }

    fn position(specs: &[FieldSpec], field: HourField) -> usize {
        specs.iter().position(|spec| spec.field == field).unwrap()
    }

    #[test]
    fn test_epa_layout_is_valid() {
        let layout = FieldLayout::epa_hourly().unwrap();

        assert_eq!(layout.fields().len(), 26);
        assert_eq!(layout.always_fields().count(), 24);
        assert_eq!(layout.summary_fields().count(), 2);
        assert_eq!(layout.min_line_len(), 163);
        assert_eq!(layout.summary_line_len(), 179);
    }

    #[test]
    fn test_byte_range_translation() {
        let layout = FieldLayout::epa_hourly().unwrap();

        let date = layout.get(HourField::Date).unwrap();
        assert_eq!(date.byte_range(), 0..10);

        let hour = layout.get(HourField::Hour).unwrap();
        assert_eq!(hour.byte_range(), 10..13);

        let precipitation = layout.get(HourField::HourlyPrecipitation).unwrap();
        assert_eq!(precipitation.byte_range(), 155..163);
        assert_eq!(precipitation.width(), 8);
    }

    #[test]
    fn test_documented_columns_are_separated_by_one_pad() {
        // Only the hour directly follows the date; every other field sits
        // after a single pad column.
        let specs = epa_specs();
        for pair in specs.windows(2).skip(1) {
            assert_eq!(
                pair[1].start,
                pair[0].end + 2,
                "gap between {} and {}",
                pair[0].name(),
                pair[1].name()
            );
        }
        assert_eq!(specs[1].start, specs[0].end + 1);
    }

    #[test]
    fn test_extract_splits_flag() {
        let spec = FieldSpec::new(HourField::GlobalHorizontalRadiation, 4, 11, FieldKind::Integer, 3);
        let line = "xx  285A7 yy";

        let raw = spec.extract(line).unwrap();
        assert_eq!(raw.raw, "  285A7 ");
        assert_eq!(raw.value, "  285");
        assert_eq!(raw.flag, "A7 ");
    }

    #[test]
    fn test_extract_short_line() {
        let spec = FieldSpec::new(HourField::Hour, 12, 14, FieldKind::Integer, 0);
        let error = spec.extract("1975-01-01 2").unwrap_err();

        assert_eq!(error.field, "hour");
        assert_eq!(error.raw, " 2");
        assert_eq!(
            error.reason,
            MalformedReason::LineTooShort {
                required: 13,
                actual: 12
            }
        );
    }

    #[test]
    fn test_extract_rejects_split_character() {
        let spec = FieldSpec::new(HourField::Hour, 12, 14, FieldKind::Integer, 0);
        // 'é' is two bytes and straddles the start of the hour field
        let line = "1975-01-0é 1";

        let error = spec.extract(line).unwrap_err();
        assert_eq!(error.reason, MalformedReason::NotCharBoundary);
    }

    #[test]
    fn test_unvalidated_spec_ranges_do_not_underflow() {
        let spec = FieldSpec::new(HourField::Date, 0, 0, FieldKind::Text, 0);
        assert_eq!(spec.byte_range(), 0..0);
        assert_eq!(spec.required_len(), 0);

        let spec = FieldSpec::new(HourField::Date, 1, 10, FieldKind::Text, 0);
        assert_eq!(spec.byte_range(), 0..9);
        assert_eq!(spec.extract("1975-01-01").unwrap().value, "1975-01-0");

        let spec = FieldSpec::new(HourField::Hour, 13, 14, FieldKind::Integer, 5);
        let raw = spec.extract("1975-01-01 12").unwrap();
        assert_eq!((raw.value, raw.flag), ("", "12"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::SnowDepth);
        specs[index].end = specs[index].start - 1;

        assert!(matches!(
            FieldLayout::new(specs),
            Err(LayoutError::InvertedRange { field: "snow_depth", .. })
        ));
    }

    #[test]
    fn test_rejects_start_before_first_column() {
        let mut specs = epa_specs();
        specs[0].start = 1;

        assert_eq!(
            FieldLayout::new(specs),
            Err(LayoutError::StartBeforeFirstColumn {
                field: "date",
                start: 1
            })
        );
    }

    #[test]
    fn test_rejects_overlap() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::WindSpeed);
        specs[index].start = 94;

        assert_eq!(
            FieldLayout::new(specs),
            Err(LayoutError::Overlap {
                first: "wind_direction",
                first_end: 94,
                second: "wind_speed",
                second_start: 94,
            })
        );
    }

    #[test]
    fn test_rejects_out_of_order_fields() {
        let mut specs = epa_specs();
        specs.swap(2, 3);

        assert!(matches!(
            FieldLayout::new(specs),
            Err(LayoutError::Overlap { .. })
        ));
    }

    #[test]
    fn test_rejects_flag_as_wide_as_field() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::ObservationIndicator);
        specs[index].flag_width = 2;

        assert!(matches!(
            FieldLayout::new(specs),
            Err(LayoutError::FlagWiderThanField {
                field: "observation_indicator",
                flag_width: 2,
                width: 2
            })
        ));
    }

    #[test]
    fn test_rejects_kind_mismatch() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::DryBulbTempC);
        specs[index].kind = FieldKind::Integer;

        assert_eq!(
            FieldLayout::new(specs),
            Err(LayoutError::KindMismatch {
                field: "dry_bulb_temp_c",
                declared: "integer",
                expected: "decimal",
            })
        );
    }

    #[test]
    fn test_rejects_presence_mismatch() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::EtoFaoShortGrass);
        specs[index].presence = Presence::Always;

        assert!(matches!(
            FieldLayout::new(specs),
            Err(LayoutError::PresenceMismatch {
                field: "eto_fao_short_grass",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let mut specs = epa_specs();
        let index = position(&specs, HourField::HourlyPrecipitation);
        let mut duplicate = specs[index];
        duplicate.start = 300;
        duplicate.end = 307;
        specs.push(duplicate);

        assert_eq!(
            FieldLayout::new(specs),
            Err(LayoutError::DuplicateField {
                field: "hourly_precipitation"
            })
        );
    }

    #[test]
    fn test_rejects_missing_field() {
        let mut specs = epa_specs();
        specs.retain(|spec| spec.field != HourField::PresentWeather);

        assert_eq!(
            FieldLayout::new(specs),
            Err(LayoutError::MissingField {
                field: "present_weather"
            })
        );
    }
}
