//! Reusable field validators
//!
//! Stores accept whatever they are given; these run at the call site
//! (HTTP handlers, the intake form) before anything reaches a store.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

use crate::core::order::OrderFormValues;

use crate::core::error::FieldValidationError;

/// Validator: string must contain something other than whitespace
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validator: calendar date in `YYYY-MM-DD` form
pub fn iso_date(value: &str) -> Result<(), ValidationError> {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
    });

    if regex.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("date");
        err.message = Some("must be a YYYY-MM-DD date".into());
        Err(err)
    }
}

/// Check the fields the intake sheet marks as required
///
/// The sheet requires a customer name, a date and a mobile number. Every
/// other field, including line amounts, is free text.
pub fn check_order_sheet(values: &OrderFormValues) -> Vec<FieldValidationError> {
    let checks: [(&str, &str, fn(&str) -> Result<(), ValidationError>); 4] = [
        ("name", values.name.as_str(), non_blank),
        ("date", values.date.as_str(), non_blank),
        ("date", values.date.as_str(), iso_date),
        ("mobile", values.mobile.as_str(), non_blank),
    ];

    let mut errors: Vec<FieldValidationError> = Vec::new();
    for (field, value, check) in checks {
        if errors.iter().any(|e| e.field == field) {
            continue;
        }
        if let Err(err) = check(value) {
            errors.push(FieldValidationError {
                field: field.to_string(),
                message: err
                    .message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            });
        }
    }
    errors
}
