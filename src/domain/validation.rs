//! Validation rules
//!
//! Pure checks over raw request fields. Field checks return an optional
//! [`FieldViolation`] so callers can aggregate every failure of a payload
//! into one [`DomainError::Validation`]; cross-field business rules return
//! a `DomainError` directly.

use std::sync::OnceLock;

use chrono::{Days, Local, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::{DomainError, FieldViolation};

/// Minimum number of installments for a credit
pub const MIN_INSTALLMENTS: i32 = 1;

/// Maximum number of installments for a credit
pub const MAX_INSTALLMENTS: i32 = 48;

/// The first installment may be at most this many days after submission
pub const MAX_DAYS_TO_FIRST_INSTALLMENT: u64 = 90;

const BLANK_MESSAGE: &str = "Invalid input";

/// Submission date used for date rules
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turn a set of optional violations into a result
pub fn collect<I>(checks: I) -> Result<(), DomainError>
where
    I: IntoIterator<Item = Option<FieldViolation>>,
{
    let violations: Vec<FieldViolation> = checks.into_iter().flatten().collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(violations))
    }
}

// =========================================================================
// Credit rules
// =========================================================================

pub fn check_installments(number_of_installments: i32) -> Option<FieldViolation> {
    if number_of_installments < MIN_INSTALLMENTS {
        Some(FieldViolation::new(
            "numberOfInstallments",
            format!("must be greater than or equal to {}", MIN_INSTALLMENTS),
        ))
    } else if number_of_installments > MAX_INSTALLMENTS {
        Some(FieldViolation::new(
            "numberOfInstallments",
            format!("must be less than or equal to {}", MAX_INSTALLMENTS),
        ))
    } else {
        None
    }
}

pub fn check_credit_value(credit_value: Decimal) -> Option<FieldViolation> {
    (credit_value <= Decimal::ZERO)
        .then(|| FieldViolation::new("creditValue", "must be greater than 0"))
}

/// Reject a first installment more than [`MAX_DAYS_TO_FIRST_INSTALLMENT`]
/// days after `today`.
pub fn ensure_first_installment_window(
    day_first_installment: NaiveDate,
    today: NaiveDate,
) -> Result<(), DomainError> {
    let within_window = today
        .checked_add_days(Days::new(MAX_DAYS_TO_FIRST_INSTALLMENT))
        .map_or(true, |limit| day_first_installment <= limit);

    if within_window {
        Ok(())
    } else {
        Err(DomainError::BusinessRule("Invalid Date".to_string()))
    }
}

/// Parse a credit code taken from a URL path
pub fn parse_credit_code(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw)
        .map_err(|_| DomainError::MalformedIdentifier(format!("Invalid UUID string: {}", raw)))
}

// =========================================================================
// Customer rules
// =========================================================================

pub fn check_not_blank(field: &'static str, value: &str) -> Option<FieldViolation> {
    value
        .trim()
        .is_empty()
        .then(|| FieldViolation::new(field, BLANK_MESSAGE))
}

pub fn check_income(income: Decimal) -> Option<FieldViolation> {
    (income < Decimal::ZERO)
        .then(|| FieldViolation::new("income", "must be greater than or equal to 0"))
}

pub fn check_email(email: &str) -> Option<FieldViolation> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("Invalid email regex")
    });

    (!re.is_match(email.trim())).then(|| FieldViolation::new("email", "Invalid email"))
}

pub fn check_tax_id(tax_id: &str) -> Option<FieldViolation> {
    (!is_valid_cpf(tax_id)).then(|| FieldViolation::new("taxId", "Invalid CPF"))
}

/// CPF check: 11 digits (punctuation allowed), not a repeated digit, and
/// both mod-11 check digits correct.
pub fn is_valid_cpf(raw: &str) -> bool {
    if raw.chars().any(|c| !(c.is_ascii_digit() || c == '.' || c == '-')) {
        return false;
    }

    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let check_digit = |len: usize| {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    check_digit(9) == digits[9] && check_digit(10) == digits[10]
}
