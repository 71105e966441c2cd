//! Per-field answer validation.
//!
//! Numbers are parsed as plain locale-free literals. Integer fields reject
//! fractional input outright instead of truncating it.

use crate::catalog::ApplianceCatalog;
use crate::error::ValidationError;

use super::field::Field;
use super::record::FieldValue;

/// Upper bound for one appliance's daily hours of use.
pub const MAX_DAILY_HOURS: f64 = 24.0;

/// Validate `utterance` as the answer to `field`.
pub fn validate(
    field: Field,
    utterance: &str,
    catalog: &ApplianceCatalog,
) -> Result<FieldValue, ValidationError> {
    let text = utterance.trim();
    match field {
        Field::Name => free_text(text).map(FieldValue::Name),
        Field::Motivation => free_text(text).map(FieldValue::Motivation),
        Field::Department => free_text(text).map(FieldValue::Department),
        Field::Municipality => free_text(text).map(FieldValue::Municipality),
        Field::OccupantCount => occupant_count(text).map(FieldValue::OccupantCount),
        Field::ApplianceHours => appliance_hours(text, catalog).map(FieldValue::ApplianceHours),
        Field::IncomeStratum => income_stratum(text).map(FieldValue::IncomeStratum),
        Field::OffsetFraction => offset_fraction(text).map(FieldValue::OffsetFraction),
    }
}

fn free_text(text: &str) -> Result<String, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(text.to_string())
}

fn occupant_count(text: &str) -> Result<u32, ValidationError> {
    let n: i64 = text.parse().map_err(|_| ValidationError::NotAWholeNumber)?;
    if n < 1 {
        return Err(ValidationError::OccupantsOutOfRange);
    }
    u32::try_from(n).map_err(|_| ValidationError::OccupantsOutOfRange)
}

fn appliance_hours(text: &str, catalog: &ApplianceCatalog) -> Result<Vec<f64>, ValidationError> {
    let hours = text
        .split(',')
        .map(|token| parse_finite(token.trim()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| ValidationError::HoursNotNumeric {
            example: catalog.example_answer(),
        })?;

    if hours.len() != catalog.len() {
        return Err(ValidationError::HoursCountMismatch {
            expected: catalog.len(),
            got: hours.len(),
        });
    }
    if hours.iter().any(|h| *h < 0.0) {
        return Err(ValidationError::NegativeHours);
    }
    if hours.iter().any(|h| *h > MAX_DAILY_HOURS) {
        return Err(ValidationError::HoursOutOfRange);
    }
    Ok(hours)
}

fn income_stratum(text: &str) -> Result<u8, ValidationError> {
    let n: i64 = text
        .parse()
        .map_err(|_| ValidationError::StratumNotAWholeNumber)?;
    if !(1..=7).contains(&n) {
        return Err(ValidationError::StratumOutOfRange);
    }
    Ok(n as u8)
}

fn offset_fraction(text: &str) -> Result<f64, ValidationError> {
    let percent = parse_finite(text).ok_or(ValidationError::OffsetNotNumeric)?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OffsetOutOfRange);
    }
    Ok(percent / 100.0)
}

/// `f64::from_str` also accepts "inf" and "NaN", which are not answers.
fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
