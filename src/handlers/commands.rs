//! Command definitions
//!
//! Commands carry the raw fields of a request into a handler. Each one knows
//! how to check its own field constraints; cross-entity rules are left to
//! the handler.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::validation;
use crate::domain::{Credit, Customer, CustomerChanges, DomainError, NewCustomer, PasswordHash};

// =========================================================================
// Credit commands
// =========================================================================

/// Command to request a new credit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCreditCommand {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreateCreditCommand {
    pub fn new(
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer_id: i64,
    ) -> Self {
        Self {
            credit_value,
            day_first_installment,
            number_of_installments,
            customer_id,
        }
    }

    /// Field constraints, all reported together
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::collect([
            validation::check_credit_value(self.credit_value),
            validation::check_installments(self.number_of_installments),
        ])
    }
}

/// Outcome of a credit request
#[derive(Debug, Clone)]
pub struct CreateCreditResult {
    pub credit: Credit,
    pub customer_email: String,
}

/// A credit together with its owner
#[derive(Debug, Clone)]
pub struct CreditDetails {
    pub credit: Credit,
    pub customer: Customer,
}

// =========================================================================
// Customer commands
// =========================================================================

/// Command to register a new customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCustomerCommand {
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub income: Decimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl RegisterCustomerCommand {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::collect([
            validation::check_not_blank("firstName", &self.first_name),
            validation::check_not_blank("lastName", &self.last_name),
            validation::check_tax_id(&self.tax_id),
            validation::check_income(self.income),
            validation::check_email(&self.email),
            validation::check_not_blank("password", &self.password),
            validation::check_not_blank("zipCode", &self.zip_code),
            validation::check_not_blank("street", &self.street),
        ])
    }

    /// Build the entity, hashing the password
    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            tax_id: self.tax_id.chars().filter(char::is_ascii_digit).collect(),
            income: self.income,
            email: self.email.trim().to_string(),
            password: PasswordHash::generate(&self.password),
            zip_code: self.zip_code,
            street: self.street,
        }
    }
}

/// Command to update a customer's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCustomerCommand {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl UpdateCustomerCommand {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::collect([
            validation::check_not_blank("firstName", &self.first_name),
            validation::check_not_blank("lastName", &self.last_name),
            validation::check_income(self.income),
            validation::check_not_blank("zipCode", &self.zip_code),
            validation::check_not_blank("street", &self.street),
        ])
    }

    pub fn changes(&self) -> CustomerChanges {
        CustomerChanges {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            income: self.income,
            zip_code: self.zip_code.clone(),
            street: self.street.clone(),
        }
    }
}
