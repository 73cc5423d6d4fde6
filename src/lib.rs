//! Credit Application Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod repository;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use error::{AppError, ErrorResponse};
pub use domain::{Credit, CreditStatus, Customer, DomainError, FieldViolation};
