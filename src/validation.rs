//! Request body validation
//!
//! Shape and range checks on inbound payloads, run before anything reaches
//! the DAO layer. Pure, stateless, synchronous.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{error::Error, types::PaymentStatus};

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex"));

#[derive(Debug, Deserialize, Validate)]
pub struct PropertyBody {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Property name must be between 3 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 5,
        max = 200,
        message = "Address must be between 5 and 200 characters"
    ))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnitBody {
    pub property_id: i64,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Unit name must be between 1 and 50 characters"
    ))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TenantBody {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Name must be between 2 and 50 characters"
    ))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone format"))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LeaseBody {
    pub unit_id: i64,
    pub tenant_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(
        exclusive_min = 0.0,
        message = "Rent amount must be positive"
    ))]
    pub rent_amount: f64,
    #[validate(range(min = 0.0, message = "Deposit cannot be negative"))]
    pub deposit: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentBody {
    pub lease_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub collector_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseBody {
    pub property_id: i64,
    #[validate(length(
        min = 2,
        max = 50,
        message = "Category must be between 2 and 50 characters"
    ))]
    pub category: String,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be positive"))]
    pub amount: f64,
    #[validate(length(
        max = 500,
        message = "Description cannot exceed 500 characters"
    ))]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChecklistBody {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Checklist name must be between 1 and 100 characters"
    ))]
    pub name: String,
    pub items: Value,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InspectionBody {
    pub property_id: i64,
    pub checklist_id: i64,
    pub inspection_date: DateTime<Utc>,
    pub results: Value,
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = password_strength)
    )]
    pub password: String,
    #[validate(length(
        min = 2,
        max = 50,
        message = "Name must be between 2 and 50 characters"
    ))]
    pub name: Option<String>,
}

/// At least one uppercase letter, one lowercase letter and one digit.
fn password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must contain at least one uppercase letter, one \
             lowercase letter, and one number"
                .into(),
        ))
    }
}

/// Run derive-based validation, flattening violations into one message.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), Error> {
    body.validate().map_err(|errors| {
        Error::Validation(describe_violations(&errors))
    })
}

fn describe_violations(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| violation.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Convert a validated JSON number into the exact decimal stored in the
/// database.
pub fn to_decimal(value: f64) -> Result<bigdecimal::BigDecimal, Error> {
    bigdecimal::BigDecimal::try_from(value).map_err(Error::BigDecimalError)
}

pub fn sanitize_string(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_bounds() {
        let valid = PropertyBody {
            name: String::from("Elm Street Apartments"),
            address: String::from("12 Elm Street, Springfield"),
        };
        assert!(validate_request(&valid).is_ok());

        let short_name = PropertyBody {
            name: String::from("ab"),
            address: String::from("12 Elm Street"),
        };
        let err = validate_request(&short_name).unwrap_err();
        assert!(err.to_string().contains("between 3 and 100"));

        let short_address = PropertyBody {
            name: String::from("Elm Street"),
            address: String::from("x"),
        };
        assert!(validate_request(&short_address).is_err());
    }

    #[test]
    fn test_tenant_email_and_phone() {
        let valid = TenantBody {
            name: String::from("Ada Lovelace"),
            email: String::from("ada@example.com"),
            phone: Some(String::from("+15550100")),
        };
        assert!(validate_request(&valid).is_ok());

        let bad_email = TenantBody {
            name: String::from("Ada"),
            email: String::from("not-an-email"),
            phone: None,
        };
        assert!(validate_request(&bad_email).is_err());

        let bad_phone = TenantBody {
            name: String::from("Ada"),
            email: String::from("ada@example.com"),
            phone: Some(String::from("0-800-ADA")),
        };
        assert!(validate_request(&bad_phone).is_err());
    }

    #[test]
    fn test_payment_amount_must_be_positive() {
        let body = PaymentBody {
            lease_id: 1,
            amount: -10.0,
            payment_date: Utc::now(),
            status: PaymentStatus::Paid,
            collector_notes: None,
        };
        let err = validate_request(&body).unwrap_err();
        assert!(err.to_string().contains("Amount must be positive"));

        let zero = PaymentBody {
            lease_id: 1,
            amount: 0.0,
            payment_date: Utc::now(),
            status: PaymentStatus::Paid,
            collector_notes: None,
        };
        assert!(validate_request(&zero).is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(password_strength("Passw0rd").is_ok());
        assert!(password_strength("alllowercase1").is_err());
        assert!(password_strength("NODIGITShere").is_err());

        let weak = RegisterBody {
            email: String::from("user@example.com"),
            password: String::from("short"),
            name: None,
        };
        let err = validate_request(&weak).unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn test_sanitize_string_strips_angle_brackets() {
        assert_eq!(
            sanitize_string("  <script>hello</script>  "),
            "scripthello/script"
        );
        assert_eq!(sanitize_string(" plain "), "plain");
    }
}
