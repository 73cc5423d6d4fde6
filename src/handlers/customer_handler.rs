//! Customer Handlers
//!
//! Registration, lookup, update and deletion of customers.

use std::sync::Arc;

use crate::domain::{Customer, DomainError};
use crate::error::AppError;
use crate::repository::CustomerRepository;

use super::{RegisterCustomerCommand, UpdateCustomerCommand};

/// Handler for all customer operations
pub struct CustomerHandler {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Validate and persist a new customer
    pub async fn register(&self, command: RegisterCustomerCommand) -> Result<Customer, AppError> {
        command.validate()?;

        let customer = self.customers.save(&command.into_new_customer()).await?;
        tracing::info!(customer_id = customer.id, "Customer registered");

        Ok(customer)
    }

    pub async fn find(&self, customer_id: i64) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(customer_id).into())
    }

    pub async fn update(&self, command: UpdateCustomerCommand) -> Result<Customer, AppError> {
        command.validate()?;

        let customer = self.find(command.customer_id).await?;
        let updated = self.customers.update(&customer.apply(command.changes())).await?;
        tracing::info!(customer_id = updated.id, "Customer updated");

        Ok(updated)
    }

    /// Delete a customer and, with it, every credit they own
    pub async fn delete(&self, customer_id: i64) -> Result<(), AppError> {
        if !self.customers.delete(customer_id).await? {
            return Err(DomainError::customer_not_found(customer_id).into());
        }
        tracing::info!(customer_id, "Customer deleted");
        Ok(())
    }
}
