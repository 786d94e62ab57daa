// Pure field validators. These know nothing about form state; they map a
// raw string to a normalized value or an error kind.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrorKind;

pub const HEIGHT_MIN_CM: f64 = 100.0;
pub const HEIGHT_MAX_CM: f64 = 250.0;
pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 100;
pub const WEIGHT_MIN_LBS: i64 = 50;
pub const WEIGHT_MAX_LBS: i64 = 500;
pub const DEFICIT_MIN_KCAL: i64 = 300;
pub const DEFICIT_MAX_KCAL: i64 = 800;

lazy_static! {
    // 5'10" or 5'10
    static ref FEET_INCHES: Regex =
        Regex::new(r#"^(\d+)\s*'\s*(\d+(?:\.\d+)?)\s*"?$"#).expect("valid regex");
    static ref FEET_ONLY: Regex =
        Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*ft$").expect("valid regex");
    static ref CENTIMETERS: Regex =
        Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*cm$").expect("valid regex");
    static ref METERS: Regex =
        Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*m$").expect("valid regex");
    static ref BARE_NUMBER: Regex =
        Regex::new(r"^\d+(?:\.\d+)?$").expect("valid regex");
}

/// Parse a free-text height into centimeters.
///
/// Accepted shapes (unit suffixes case-insensitive): `5'10"`, `5'10`,
/// `5ft`, `170cm`, `1.70m`, `170m`, or a bare number read as centimeters.
/// The converted value must land in [100, 250] cm.
pub fn validate_height(raw: &str) -> Result<f64, FieldErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    if trimmed.contains('-') {
        return Err(FieldErrorKind::NegativeValue);
    }

    let centimeters = if let Some(caps) = FEET_INCHES.captures(trimmed) {
        let feet = parse_f64(&caps[1])?;
        let inches = parse_f64(&caps[2])?;
        (feet * 12.0 + inches) * 2.54
    } else if let Some(caps) = FEET_ONLY.captures(trimmed) {
        parse_f64(&caps[1])? * 30.48
    } else if let Some(caps) = CENTIMETERS.captures(trimmed) {
        parse_f64(&caps[1])?
    } else if let Some(caps) = METERS.captures(trimmed) {
        parse_f64(&caps[1])? * 100.0
    } else if BARE_NUMBER.is_match(trimmed) {
        parse_f64(trimmed)?
    } else {
        return Err(FieldErrorKind::InvalidFormat);
    };

    if !(HEIGHT_MIN_CM..=HEIGHT_MAX_CM).contains(&centimeters) {
        return Err(FieldErrorKind::OutOfRange);
    }
    Ok(centimeters)
}

/// Required, integer-parseable, within a closed interval. Non-numeric
/// input is reported as `InvalidFormat`.
pub fn validate_integer_field(raw: &str, min: i64, max: i64) -> Result<i64, FieldErrorKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| FieldErrorKind::InvalidFormat)?;
    if value < min || value > max {
        return Err(FieldErrorKind::OutOfRange);
    }
    Ok(value)
}

fn parse_f64(digits: &str) -> Result<f64, FieldErrorKind> {
    digits.parse().map_err(|_| FieldErrorKind::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn feet_and_inches_convert_to_centimeters() {
        assert_close(validate_height("5'10\"").expect("valid"), 177.8);
        assert_close(validate_height("5'10").expect("valid"), 177.8);
        assert_close(validate_height("6'0\"").expect("valid"), 182.88);
    }

    #[test]
    fn feet_only_converts() {
        assert_close(validate_height("5ft").expect("valid"), 152.4);
        assert_close(validate_height("5 FT").expect("valid"), 152.4);
    }

    #[test]
    fn metric_forms_convert() {
        assert_close(validate_height("170cm").expect("valid"), 170.0);
        assert_close(validate_height("170 CM").expect("valid"), 170.0);
        assert_close(validate_height("1.70m").expect("valid"), 170.0);
        assert_close(validate_height("170").expect("valid"), 170.0);
        assert_close(validate_height("170.5").expect("valid"), 170.5);
    }

    #[test]
    fn meters_are_scaled_even_when_absurd() {
        // 170m parses as meters and then fails the range check.
        assert_eq!(validate_height("170m"), Err(FieldErrorKind::OutOfRange));
    }

    #[test]
    fn empty_input_is_required() {
        assert_eq!(validate_height(""), Err(FieldErrorKind::Required));
        assert_eq!(validate_height("   "), Err(FieldErrorKind::Required));
    }

    #[test]
    fn minus_sign_is_negative_value() {
        assert_eq!(validate_height("-5'10\""), Err(FieldErrorKind::NegativeValue));
        assert_eq!(validate_height("-170cm"), Err(FieldErrorKind::NegativeValue));
    }

    #[test]
    fn unrecognized_shapes_are_invalid_format() {
        assert_eq!(validate_height("tall"), Err(FieldErrorKind::InvalidFormat));
        assert_eq!(validate_height("5feet10"), Err(FieldErrorKind::InvalidFormat));
        assert_eq!(validate_height("170 inches"), Err(FieldErrorKind::InvalidFormat));
    }

    #[test]
    fn out_of_range_heights_are_rejected() {
        assert_eq!(validate_height("9999cm"), Err(FieldErrorKind::OutOfRange));
        assert_eq!(validate_height("99"), Err(FieldErrorKind::OutOfRange));
        assert_close(validate_height("100").expect("lower bound"), 100.0);
        assert_close(validate_height("250").expect("upper bound"), 250.0);
    }

    #[test]
    fn valid_heights_are_format_stable() {
        // Re-validating the canonical centimeter rendering must agree with
        // the first pass.
        for input in ["5'10\"", "5ft", "170cm", "1.70m", "183"] {
            let first = validate_height(input).expect("valid input");
            let canonical = format!("{first}cm");
            let second = validate_height(&canonical).expect("canonical form revalidates");
            assert_close(second, first);
        }
    }

    #[test]
    fn integer_field_bounds_are_inclusive() {
        assert_eq!(validate_integer_field("18", AGE_MIN, AGE_MAX), Ok(18));
        assert_eq!(validate_integer_field("100", AGE_MIN, AGE_MAX), Ok(100));
        assert_eq!(
            validate_integer_field("17", AGE_MIN, AGE_MAX),
            Err(FieldErrorKind::OutOfRange)
        );
        assert_eq!(
            validate_integer_field("101", AGE_MIN, AGE_MAX),
            Err(FieldErrorKind::OutOfRange)
        );
    }

    #[test]
    fn integer_field_rejects_non_numbers() {
        assert_eq!(
            validate_integer_field("", WEIGHT_MIN_LBS, WEIGHT_MAX_LBS),
            Err(FieldErrorKind::Required)
        );
        assert_eq!(
            validate_integer_field("abc", WEIGHT_MIN_LBS, WEIGHT_MAX_LBS),
            Err(FieldErrorKind::InvalidFormat)
        );
        assert_eq!(
            validate_integer_field("72.5", WEIGHT_MIN_LBS, WEIGHT_MAX_LBS),
            Err(FieldErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn calorie_deficit_uses_form_variant_bounds() {
        // The validated range is 300-800 kcal, matching the shipped form's
        // guidance copy.
        assert_eq!(
            validate_integer_field("300", DEFICIT_MIN_KCAL, DEFICIT_MAX_KCAL),
            Ok(300)
        );
        assert_eq!(
            validate_integer_field("800", DEFICIT_MIN_KCAL, DEFICIT_MAX_KCAL),
            Ok(800)
        );
        assert_eq!(
            validate_integer_field("299", DEFICIT_MIN_KCAL, DEFICIT_MAX_KCAL),
            Err(FieldErrorKind::OutOfRange)
        );
        assert_eq!(
            validate_integer_field("801", DEFICIT_MIN_KCAL, DEFICIT_MAX_KCAL),
            Err(FieldErrorKind::OutOfRange)
        );
    }
}
