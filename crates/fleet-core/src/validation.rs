//! # Input Validation
//!
//! Field-level checks shared by the fleet planner and the session prompts.
//! Every function returns the cleaned value so callers store exactly what
//! was validated.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_VEHICLE_TEXT_LEN;

/// Same pattern the registration form has always accepted.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9]+[A-Za-z0-9._%+-]*@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

const MAX_USER_NAME_LEN: usize = 100;

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

fn required_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(trimmed.to_string())
}

/// Model name: non-blank, bounded.
pub fn validate_model(model: &str) -> Result<String, ValidationError> {
    required_text("model", model, MAX_VEHICLE_TEXT_LEN)
}

/// Category: non-blank, bounded. Not restricted to the recommended list.
pub fn validate_category(category: &str) -> Result<String, ValidationError> {
    required_text("category", category, MAX_VEHICLE_TEXT_LEN)
}

/// Daily price: zero is allowed, negative is not.
pub fn validate_price(price: Money) -> Result<Money, ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price_per_day".to_string(),
        });
    }
    Ok(price)
}

/// Rental length in days, strictly positive.
pub fn validate_rental_days(days: i64) -> Result<i64, ValidationError> {
    if days <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "days".to_string(),
            value: days,
        });
    }
    Ok(days)
}

/// Trims and upper-cases a typed vehicle id (`m001` → `M001`).
pub fn normalize_vehicle_id(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Trims and lower-cases an email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks format and returns the normalized address.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return Err(ValidationError::required("email"));
    }
    if !email_regex().is_some_and(|re| re.is_match(&normalized)) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain.tld".to_string(),
        });
    }
    Ok(normalized)
}

pub fn validate_user_name(name: &str) -> Result<String, ValidationError> {
    required_text("name", name, MAX_USER_NAME_LEN)
}

/// Passwords are only required to be non-empty; surrounding whitespace is kept.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}
