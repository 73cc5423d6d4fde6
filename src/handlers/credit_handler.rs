//! Credit Handlers
//!
//! Credit request creation, lookup by code and listing per customer.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{validation, Credit, Customer, DomainError};
use crate::error::AppError;
use crate::repository::{CreditRepository, CustomerRepository};

use super::{CreateCreditCommand, CreateCreditResult, CreditDetails};

async fn require_customer(
    customers: &dyn CustomerRepository,
    customer_id: i64,
) -> Result<Customer, AppError> {
    customers
        .find_by_id(customer_id)
        .await?
        .ok_or_else(|| DomainError::customer_not_found(customer_id).into())
}

// =========================================================================
// CreateCreditHandler
// =========================================================================

/// Handler for new credit requests
pub struct CreateCreditHandler {
    customers: Arc<dyn CustomerRepository>,
    credits: Arc<dyn CreditRepository>,
}

impl CreateCreditHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, credits: Arc<dyn CreditRepository>) -> Self {
        Self { customers, credits }
    }

    /// Execute the command with today's date as submission date
    pub async fn execute(&self, command: CreateCreditCommand) -> Result<CreateCreditResult, AppError> {
        self.execute_on(command, validation::today()).await
    }

    /// Execute the command as if submitted on `today`
    pub async fn execute_on(
        &self,
        command: CreateCreditCommand,
        today: NaiveDate,
    ) -> Result<CreateCreditResult, AppError> {
        command.validate()?;

        let customer = require_customer(self.customers.as_ref(), command.customer_id).await?;

        validation::ensure_first_installment_window(command.day_first_installment, today)?;

        let credit = Credit::request(
            command.credit_value,
            command.day_first_installment,
            command.number_of_installments,
            customer.id,
        );
        let credit = self.credits.save(&credit).await?;

        tracing::info!(
            credit_code = %credit.credit_code,
            customer_id = customer.id,
            installments = credit.number_of_installments,
            "Credit request saved"
        );

        Ok(CreateCreditResult {
            credit,
            customer_email: customer.email,
        })
    }
}

// =========================================================================
// FindCreditHandler
// =========================================================================

/// Handler for credit lookup by code on behalf of a customer
pub struct FindCreditHandler {
    customers: Arc<dyn CustomerRepository>,
    credits: Arc<dyn CreditRepository>,
}

impl FindCreditHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, credits: Arc<dyn CreditRepository>) -> Self {
        Self { customers, credits }
    }

    /// Find a credit by its raw path code, checking ownership
    pub async fn execute(&self, raw_code: &str, customer_id: i64) -> Result<CreditDetails, AppError> {
        let credit_code = validation::parse_credit_code(raw_code)?;
        self.find(credit_code, customer_id).await
    }

    async fn find(&self, credit_code: Uuid, customer_id: i64) -> Result<CreditDetails, AppError> {
        let credit = self
            .credits
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Creditcode {} not found", credit_code)))?;

        if !credit.is_owned_by(customer_id) {
            tracing::warn!(
                credit_code = %credit_code,
                customer_id,
                "Credit lookup by non-owner"
            );
            return Err(DomainError::ownership_mismatch().into());
        }

        let customer = require_customer(self.customers.as_ref(), credit.customer_id).await?;

        Ok(CreditDetails { credit, customer })
    }
}

// =========================================================================
// ListCreditsHandler
// =========================================================================

/// Handler listing every credit of a customer
pub struct ListCreditsHandler {
    credits: Arc<dyn CreditRepository>,
}

impl ListCreditsHandler {
    pub fn new(credits: Arc<dyn CreditRepository>) -> Self {
        Self { credits }
    }

    pub async fn execute(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        Ok(self.credits.find_all_by_customer_id(customer_id).await?)
    }
}
