//! Input validation helpers shared by the HTTP boundary and the services.
//!
//! Custom rules report a code rather than a message; [`collect_messages`]
//! turns codes into readable sentences using the field name.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::config::WEIGHT_DECIMAL_PLACES;
use crate::errors::{AppError, AppResult};

/// Gender values accepted for animals.
pub const GENDERS: [&str; 2] = ["Male", "Female"];

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Accepts exactly "Male" or "Female".
pub fn gender(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !GENDERS.contains(&value) {
        return Err(ValidationError::new("gender"));
    }
    Ok(())
}

/// Required, then shaped like an email address.
pub fn email_address(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !value.validate_email() {
        return Err(ValidationError::new("email"));
    }
    Ok(())
}

/// Positive once rounded to the stored precision.
pub fn positive_weight(value: &Decimal) -> Result<(), ValidationError> {
    if value.round_dp(WEIGHT_DECIMAL_PLACES) <= Decimal::ZERO {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

/// Validate an input and convert failures into [`AppError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Validation(collect_messages(&e)))
}

/// Flatten validation errors into messages, ordered by field name.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(|e| describe(&field, e))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = field_label(field);
    match error.code.as_ref() {
        "required" => format!("{} is required.", label),
        "gender" => "Gender must be 'Male' or 'Female'.".to_string(),
        "positive" => format!("{} must be greater than zero.", label),
        _ => format!("{} is invalid.", label),
    }
}

/// `inventory_number` -> `Inventory number`
fn field_label(field: &str) -> String {
    match field {
        "user_name" => return "Username".to_string(),
        "weight_kg" => return "Weight".to_string(),
        _ => {}
    }

    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Serde helpers for calendar dates supplied by clients.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (reduced to the calendar date
/// in its own offset) or a timestamp without offset.
pub mod date_input {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.date_naive());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.date());
        }
        Err(format!("'{}' is not a valid date", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        inventory_number: String,
        #[validate(custom(function = "gender"))]
        gender: String,
        #[validate(range(min = 1, message = "BreedId must be a positive number."))]
        breed_id: i32,
    }

    #[test]
    fn messages_are_derived_from_codes_and_sorted() {
        let sample = Sample {
            inventory_number: "  ".into(),
            gender: "Other".into(),
            breed_id: 0,
        };

        let messages = collect_messages(&sample.validate().unwrap_err());

        assert_eq!(
            messages,
            vec![
                "BreedId must be a positive number.".to_string(),
                "Gender must be 'Male' or 'Female'.".to_string(),
                "Inventory number is required.".to_string(),
            ]
        );
    }

    #[test]
    fn blank_gender_reports_required() {
        assert_eq!(gender("").unwrap_err().code, "required");
        assert!(gender("Female").is_ok());
        assert!(gender("female").is_err());
    }

    #[test]
    fn email_reports_required_before_shape() {
        assert_eq!(email_address(" ").unwrap_err().code, "required");
        assert_eq!(email_address("alice").unwrap_err().code, "email");
        assert!(email_address("alice@example.com").is_ok());
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(positive_weight(&Decimal::new(1, 2)).is_ok());
        assert!(positive_weight(&Decimal::ZERO).is_err());
        assert!(positive_weight(&Decimal::new(-5, 0)).is_err());
        assert!(positive_weight(&Decimal::new(4, 3)).is_err());
        assert!(positive_weight(&Decimal::new(6, 3)).is_ok());
    }

    #[test]
    fn plain_dates_parse() {
        let date = date_input::parse("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn timestamps_keep_their_own_calendar_date() {
        // 23:30 at +02:00 is still the 15th locally even though it is the 15th 21:30 UTC
        let late = date_input::parse("2024-03-15T23:30:00+02:00").unwrap();
        // 00:15 at -05:00 is the 15th locally but already the 15th 05:15 UTC
        let early = date_input::parse("2024-03-15T00:15:00-05:00").unwrap();

        assert_eq!(late, early);
        assert_eq!(late, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(date_input::parse("15/03/2024").is_err());
        assert!(date_input::parse("").is_err());
    }
}
