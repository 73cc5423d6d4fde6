//! Domain module
//!
//! Core domain types and business rules.

pub mod credit;
pub mod customer;
pub mod error;
pub mod validation;

pub use credit::{Credit, CreditStatus};
pub use customer::{Customer, CustomerChanges, NewCustomer, PasswordHash};
pub use error::{DomainError, FieldViolation};
