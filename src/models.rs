//! Decoded hourly records and the attributes they carry.
//!
//! [`HourField`] names every attribute of an [`Hour`] and fixes the type and
//! presence the layout table must declare for it. The decoder writes into
//! an `Hour` through the typed setters here, so the layout table and the
//! record cannot drift apart without the layout failing validation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::DAILY_SUMMARY_HOUR;
use crate::layout::{FieldKind, Presence};

/// Attributes of an hourly record, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourField {
    Date,
    Hour,
    ExtraterrestrialHorizontalRadiation,
    ExtraterrestrialDirectNormalRadiation,
    GlobalHorizontalRadiation,
    DirectNormalRadiation,
    DiffuseHorizontalRadiation,
    TotalSkyCover,
    OpaqueSkyCover,
    DryBulbTempC,
    DewPointTempC,
    RelativeHumidity,
    StationPressureKpa,
    WindDirection,
    WindSpeed,
    HorizontalVisibility,
    CeilingHeight,
    ObservationIndicator,
    PresentWeather,
    PrecipitableWater,
    BroadbandAerosolOpticalDepth,
    SnowDepth,
    DaysSinceLastSnowfall,
    HourlyPrecipitation,
    EtoFaoShortGrass,
    EpClassAPanEvaporation,
}

impl HourField {
    pub const ALL: [HourField; 26] = [
        HourField::Date,
        HourField::Hour,
        HourField::ExtraterrestrialHorizontalRadiation,
        HourField::ExtraterrestrialDirectNormalRadiation,
        HourField::GlobalHorizontalRadiation,
        HourField::DirectNormalRadiation,
        HourField::DiffuseHorizontalRadiation,
        HourField::TotalSkyCover,
        HourField::OpaqueSkyCover,
        HourField::DryBulbTempC,
        HourField::DewPointTempC,
        HourField::RelativeHumidity,
        HourField::StationPressureKpa,
        HourField::WindDirection,
        HourField::WindSpeed,
        HourField::HorizontalVisibility,
        HourField::CeilingHeight,
        HourField::ObservationIndicator,
        HourField::PresentWeather,
        HourField::PrecipitableWater,
        HourField::BroadbandAerosolOpticalDepth,
        HourField::SnowDepth,
        HourField::DaysSinceLastSnowfall,
        HourField::HourlyPrecipitation,
        HourField::EtoFaoShortGrass,
        HourField::EpClassAPanEvaporation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HourField::Date => "date",
            HourField::Hour => "hour",
            HourField::ExtraterrestrialHorizontalRadiation => {
                "extraterrestrial_horizontal_radiation"
            }
            HourField::ExtraterrestrialDirectNormalRadiation => {
                "extraterrestrial_direct_normal_radiation"
            }
            HourField::GlobalHorizontalRadiation => "global_horizontal_radiation",
            HourField::DirectNormalRadiation => "direct_normal_radiation",
            HourField::DiffuseHorizontalRadiation => "diffuse_horizontal_radiation",
            HourField::TotalSkyCover => "total_sky_cover",
            HourField::OpaqueSkyCover => "opaque_sky_cover",
            HourField::DryBulbTempC => "dry_bulb_temp_c",
            HourField::DewPointTempC => "dew_point_temp_c",
            HourField::RelativeHumidity => "relative_humidity",
            HourField::StationPressureKpa => "station_pressure_kpa",
            HourField::WindDirection => "wind_direction",
            HourField::WindSpeed => "wind_speed",
            HourField::HorizontalVisibility => "horizontal_visibility",
            HourField::CeilingHeight => "ceiling_height",
            HourField::ObservationIndicator => "observation_indicator",
            HourField::PresentWeather => "present_weather",
            HourField::PrecipitableWater => "precipitable_water",
            HourField::BroadbandAerosolOpticalDepth => "broadband_aerosol_optical_depth",
            HourField::SnowDepth => "snow_depth",
            HourField::DaysSinceLastSnowfall => "days_since_last_snowfall",
            HourField::HourlyPrecipitation => "hourly_precipitation",
            HourField::EtoFaoShortGrass => "eto_fao_short_grass",
            HourField::EpClassAPanEvaporation => "ep_class_a_pan_evaporation",
        }
    }

    /// Type the record stores this attribute as
    pub fn kind(&self) -> FieldKind {
        match self {
            HourField::Date | HourField::PresentWeather => FieldKind::Text,
            HourField::DryBulbTempC
            | HourField::DewPointTempC
            | HourField::StationPressureKpa
            | HourField::WindSpeed
            | HourField::HorizontalVisibility
            | HourField::BroadbandAerosolOpticalDepth
            | HourField::HourlyPrecipitation
            | HourField::EtoFaoShortGrass
            | HourField::EpClassAPanEvaporation => FieldKind::Decimal,
            _ => FieldKind::Integer,
        }
    }

    pub fn presence(&self) -> Presence {
        match self {
            HourField::EtoFaoShortGrass | HourField::EpClassAPanEvaporation => {
                Presence::SummaryHourOnly
            }
            _ => Presence::Always,
        }
    }
}

/// Borrowed view of one attribute value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i32),
    Decimal(f64),
}

/// Daily evaporation values carried by the summary hour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyEvaporation {
    /// Eto, FAO short grass (mm/day)
    pub eto_fao_short_grass: f64,
    /// Ep, class A pan evaporation (mm/day)
    pub ep_class_a_pan_evaporation: f64,
}

/// Non-blank flag characters that followed a value in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFlag {
    pub field: HourField,
    pub code: String,
}

/// One decoded hourly observation.
///
/// Units are the file's own; nothing is converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hour {
    /// `yyyy-mm-dd`
    pub date: String,
    /// 1 to 24, or 25 for the daily summary row
    pub hour: i32,
    /// Wh/m²
    pub extraterrestrial_horizontal_radiation: i32,
    pub extraterrestrial_direct_normal_radiation: i32,
    pub global_horizontal_radiation: i32,
    pub direct_normal_radiation: i32,
    pub diffuse_horizontal_radiation: i32,
    /// Tenths of sky covered
    pub total_sky_cover: i32,
    pub opaque_sky_cover: i32,
    pub dry_bulb_temp_c: f64,
    pub dew_point_temp_c: f64,
    /// Percent
    pub relative_humidity: i32,
    pub station_pressure_kpa: f64,
    /// Degrees, N=0 E=90
    pub wind_direction: i32,
    /// m/s at 10 m
    pub wind_speed: f64,
    /// km
    pub horizontal_visibility: f64,
    /// m
    pub ceiling_height: i32,
    pub observation_indicator: i32,
    pub present_weather: String,
    /// mm
    pub precipitable_water: i32,
    pub broadband_aerosol_optical_depth: f64,
    /// cm
    pub snow_depth: i32,
    pub days_since_last_snowfall: i32,
    /// cm
    pub hourly_precipitation: f64,
    /// Present only on the daily summary hour
    pub daily: Option<DailyEvaporation>,
    pub flags: Vec<SourceFlag>,
}

impl Hour {
    pub fn is_daily_summary(&self) -> bool {
        self.hour == DAILY_SUMMARY_HOUR
    }

    /// Flag characters recorded for `field`, if any
    pub fn flag(&self, field: HourField) -> Option<&str> {
        self.flags
            .iter()
            .find(|flag| flag.field == field)
            .map(|flag| flag.code.as_str())
    }

    /// Calendar date of the observation
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// End of the observed hour. Hours run 1 to 24, so hour 24 ends at
    /// midnight of the following day. The summary hour has no end time.
    pub fn observation_end(&self) -> Option<NaiveDateTime> {
        if !(1..=24).contains(&self.hour) {
            return None;
        }
        let midnight = self.calendar_date()?.and_hms_opt(0, 0, 0)?;
        midnight.checked_add_signed(Duration::hours(self.hour as i64))
    }

    /// Value of any attribute. Summary-only attributes are `None` on
    /// ordinary hours.
    pub fn value(&self, field: HourField) -> Option<FieldValue<'_>> {
        use FieldValue::{Decimal, Integer, Text};

        let value = match field {
            HourField::Date => Text(&self.date),
            HourField::Hour => Integer(self.hour),
            HourField::ExtraterrestrialHorizontalRadiation => {
                Integer(self.extraterrestrial_horizontal_radiation)
            }
            HourField::ExtraterrestrialDirectNormalRadiation => {
                Integer(self.extraterrestrial_direct_normal_radiation)
            }
            HourField::GlobalHorizontalRadiation => Integer(self.global_horizontal_radiation),
            HourField::DirectNormalRadiation => Integer(self.direct_normal_radiation),
            HourField::DiffuseHorizontalRadiation => Integer(self.diffuse_horizontal_radiation),
            HourField::TotalSkyCover => Integer(self.total_sky_cover),
            HourField::OpaqueSkyCover => Integer(self.opaque_sky_cover),
            HourField::DryBulbTempC => Decimal(self.dry_bulb_temp_c),
            HourField::DewPointTempC => Decimal(self.dew_point_temp_c),
            HourField::RelativeHumidity => Integer(self.relative_humidity),
            HourField::StationPressureKpa => Decimal(self.station_pressure_kpa),
            HourField::WindDirection => Integer(self.wind_direction),
            HourField::WindSpeed => Decimal(self.wind_speed),
            HourField::HorizontalVisibility => Decimal(self.horizontal_visibility),
            HourField::CeilingHeight => Integer(self.ceiling_height),
            HourField::ObservationIndicator => Integer(self.observation_indicator),
            HourField::PresentWeather => Text(&self.present_weather),
            HourField::PrecipitableWater => Integer(self.precipitable_water),
            HourField::BroadbandAerosolOpticalDepth => {
                Decimal(self.broadband_aerosol_optical_depth)
            }
            HourField::SnowDepth => Integer(self.snow_depth),
            HourField::DaysSinceLastSnowfall => Integer(self.days_since_last_snowfall),
            HourField::HourlyPrecipitation => Decimal(self.hourly_precipitation),
            HourField::EtoFaoShortGrass => Decimal(self.daily.as_ref()?.eto_fao_short_grass),
            HourField::EpClassAPanEvaporation => {
                Decimal(self.daily.as_ref()?.ep_class_a_pan_evaporation)
            }
        };
        Some(value)
    }

    // Setters ignore attributes of another kind; `FieldLayout::new` rejects
    // a table whose kinds disagree with `HourField::kind`.

    pub(crate) fn set_text(&mut self, field: HourField, value: String) {
        match field {
            HourField::Date => self.date = value,
            HourField::PresentWeather => self.present_weather = value,
            _ => {}
        }
    }

    pub(crate) fn set_integer(&mut self, field: HourField, value: i32) {
        match field {
            HourField::Hour => self.hour = value,
            HourField::ExtraterrestrialHorizontalRadiation => {
                self.extraterrestrial_horizontal_radiation = value
            }
            HourField::ExtraterrestrialDirectNormalRadiation => {
                self.extraterrestrial_direct_normal_radiation = value
            }
            HourField::GlobalHorizontalRadiation => self.global_horizontal_radiation = value,
            HourField::DirectNormalRadiation => self.direct_normal_radiation = value,
            HourField::DiffuseHorizontalRadiation => self.diffuse_horizontal_radiation = value,
            HourField::TotalSkyCover => self.total_sky_cover = value,
            HourField::OpaqueSkyCover => self.opaque_sky_cover = value,
            HourField::RelativeHumidity => self.relative_humidity = value,
            HourField::WindDirection => self.wind_direction = value,
            HourField::CeilingHeight => self.ceiling_height = value,
            HourField::ObservationIndicator => self.observation_indicator = value,
            HourField::PrecipitableWater => self.precipitable_water = value,
            HourField::SnowDepth => self.snow_depth = value,
            HourField::DaysSinceLastSnowfall => self.days_since_last_snowfall = value,
            _ => {}
        }
    }

    pub(crate) fn set_decimal(&mut self, field: HourField, value: f64) {
        match field {
            HourField::DryBulbTempC => self.dry_bulb_temp_c = value,
            HourField::DewPointTempC => self.dew_point_temp_c = value,
            HourField::StationPressureKpa => self.station_pressure_kpa = value,
            HourField::WindSpeed => self.wind_speed = value,
            HourField::HorizontalVisibility => self.horizontal_visibility = value,
            HourField::BroadbandAerosolOpticalDepth => {
                self.broadband_aerosol_optical_depth = value
            }
            HourField::HourlyPrecipitation => self.hourly_precipitation = value,
            HourField::EtoFaoShortGrass => {
                self.daily.get_or_insert_with(Default::default).eto_fao_short_grass = value
            }
            HourField::EpClassAPanEvaporation => {
                self.daily
                    .get_or_insert_with(Default::default)
                    .ep_class_a_pan_evaporation = value
            }
            _ => {}
        }
    }

    pub(crate) fn push_flag(&mut self, field: HourField, code: &str) {
        self.flags.push(SourceFlag {
            field,
            code: code.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour_on(date: &str, hour: i32) -> Hour {
        Hour {
            date: date.to_string(),
            hour,
            ..Hour::default()
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<&str> = HourField::ALL.iter().map(HourField::name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), HourField::ALL.len());
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = HourField::ALL;
        sorted.sort();
        assert_eq!(sorted, HourField::ALL);
    }

    #[test]
    fn test_setters_cover_every_field() {
        let mut hour = Hour::default();

        for field in HourField::ALL {
            match field.kind() {
                FieldKind::Text => hour.set_text(field, format!("{}-text", field.name())),
                FieldKind::Integer => hour.set_integer(field, 7),
                FieldKind::Decimal => hour.set_decimal(field, 1.5),
            }
        }

        for field in HourField::ALL {
            let value = hour.value(field).unwrap();
            match field.kind() {
                FieldKind::Text => {
                    assert_eq!(value, FieldValue::Text(&format!("{}-text", field.name())))
                }
                FieldKind::Integer => assert_eq!(value, FieldValue::Integer(7), "{field:?}"),
                FieldKind::Decimal => assert_eq!(value, FieldValue::Decimal(1.5), "{field:?}"),
            }
        }
    }

    #[test]
    fn test_summary_values_absent_on_ordinary_hour() {
        let hour = hour_on("1975-01-01", 12);

        assert!(!hour.is_daily_summary());
        assert_eq!(hour.value(HourField::EtoFaoShortGrass), None);
        assert_eq!(hour.value(HourField::EpClassAPanEvaporation), None);
    }

    #[test]
    fn test_flag_lookup() {
        let mut hour = hour_on("1975-01-01", 12);
        hour.push_flag(HourField::GlobalHorizontalRadiation, "A7");

        assert_eq!(hour.flag(HourField::GlobalHorizontalRadiation), Some("A7"));
        assert_eq!(hour.flag(HourField::DirectNormalRadiation), None);
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(
            hour_on("1975-03-09", 1).calendar_date(),
            NaiveDate::from_ymd_opt(1975, 3, 9)
        );
        assert_eq!(hour_on("1975-13-09", 1).calendar_date(), None);
    }

    #[test]
    fn test_observation_end_uses_hour_ending_convention() {
        let noon = hour_on("1975-01-01", 12).observation_end().unwrap();
        assert_eq!(
            noon,
            NaiveDate::from_ymd_opt(1975, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );

        let midnight = hour_on("1975-12-31", 24).observation_end().unwrap();
        assert_eq!(
            midnight,
            NaiveDate::from_ymd_opt(1976, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        assert_eq!(hour_on("1975-01-01", 25).observation_end(), None);
        assert_eq!(hour_on("1975-01-01", 0).observation_end(), None);
    }
}
