//! Command Handlers module
//!
//! Handlers orchestrate validation, lookups and persistence for one
//! operation each. Repositories are passed in explicitly.

mod commands;
mod credit_handler;
mod customer_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use credit_handler::{CreateCreditHandler, FindCreditHandler, ListCreditsHandler};
pub use customer_handler::CustomerHandler;
