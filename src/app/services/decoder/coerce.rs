//! Type coercion of sliced field values

use crate::error::{MalformedFieldError, MalformedReason};
use crate::layout::{FieldSpec, RawField};

/// Text values are passed through trimmed
pub fn text(value: &str) -> String {
    value.trim().to_string()
}

/// Parse a base-10 integer, allowing surrounding whitespace and a sign
pub fn integer(spec: &FieldSpec, raw: &RawField<'_>) -> Result<i32, MalformedFieldError> {
    let value = non_blank(spec, raw)?;
    value
        .parse::<i32>()
        .map_err(|e| spec.malformed(raw.raw, MalformedReason::InvalidInteger(e)))
}

/// Parse a base-10 decimal, allowing surrounding whitespace and a sign.
///
/// Exponents, `inf` and `NaN` are rejected even though `f64` parsing
/// would take them.
pub fn decimal(spec: &FieldSpec, raw: &RawField<'_>) -> Result<f64, MalformedFieldError> {
    let value = non_blank(spec, raw)?;
    if !value
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-'))
    {
        return Err(spec.malformed(raw.raw, MalformedReason::UnsupportedDecimalNotation));
    }
    value
        .parse::<f64>()
        .map_err(|e| spec.malformed(raw.raw, MalformedReason::InvalidDecimal(e)))
}

// A blank numeric field is an error, never zero
fn non_blank<'a>(spec: &FieldSpec, raw: &RawField<'a>) -> Result<&'a str, MalformedFieldError> {
    let value = raw.value.trim();
    if value.is_empty() {
        return Err(spec.malformed(raw.raw, MalformedReason::Blank));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldKind;
    use crate::models::HourField;

    fn raw(value: &str) -> RawField<'_> {
        RawField {
            raw: value,
            value,
            flag: "",
        }
    }

    fn temperature() -> FieldSpec {
        FieldSpec::new(HourField::DryBulbTempC, 65, 70, FieldKind::Decimal, 1)
    }

    fn humidity() -> FieldSpec {
        FieldSpec::new(HourField::RelativeHumidity, 79, 82, FieldKind::Integer, 1)
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(text(" 999999999 "), "999999999");
        assert_eq!(text("   "), "");
    }

    #[test]
    fn test_integer_with_whitespace_and_sign() {
        assert_eq!(integer(&humidity(), &raw(" 52")).unwrap(), 52);
        assert_eq!(integer(&humidity(), &raw(" -5")).unwrap(), -5);
        assert_eq!(integer(&humidity(), &raw(" +5")).unwrap(), 5);
        assert_eq!(integer(&humidity(), &raw("007")).unwrap(), 7);
    }

    #[test]
    fn test_integer_rejects_decimal_text() {
        let error = integer(&humidity(), &raw("5.2")).unwrap_err();

        assert_eq!(error.field, "relative_humidity");
        assert_eq!(error.raw, "5.2");
        assert!(matches!(error.reason, MalformedReason::InvalidInteger(_)));
    }

    #[test]
    fn test_decimal_with_whitespace_and_sign() {
        assert_eq!(decimal(&temperature(), &raw(" -3.9")).unwrap(), -3.9);
        assert_eq!(decimal(&temperature(), &raw("+12.5")).unwrap(), 12.5);
        assert_eq!(decimal(&temperature(), &raw("   20")).unwrap(), 20.0);
    }

    #[test]
    fn test_blank_decimal_is_error_not_zero() {
        let error = decimal(&temperature(), &raw("     ")).unwrap_err();

        assert_eq!(error.reason, MalformedReason::Blank);
        assert_eq!(error.start, 65);
        assert_eq!(error.end, 70);
    }

    #[test]
    fn test_blank_integer_is_error() {
        let error = integer(&humidity(), &raw("   ")).unwrap_err();
        assert_eq!(error.reason, MalformedReason::Blank);
    }

    #[test]
    fn test_decimal_rejects_float_notations() {
        for text in ["  NaN", "  inf", "-inf ", " 1e2 ", "2.5E-1"] {
            let error = decimal(&temperature(), &raw(text)).unwrap_err();
            assert_eq!(
                error.reason,
                MalformedReason::UnsupportedDecimalNotation,
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        let error = decimal(&temperature(), &raw(" 1-.2")).unwrap_err();
        assert!(matches!(error.reason, MalformedReason::InvalidDecimal(_)));
    }
}
