//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::handlers::{
    CreateCreditHandler, CustomerHandler, FindCreditHandler, ListCreditsHandler,
};
use crate::repository::{
    CreditRepository, CustomerRepository, InMemoryCreditRepository, InMemoryCustomerRepository,
    InMemoryStore, PgCreditRepository, PgCustomerRepository,
};

/// Repositories shared by every request
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub credits: Arc<dyn CreditRepository>,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerRepository>, credits: Arc<dyn CreditRepository>) -> Self {
        Self { customers, credits }
    }

    /// State backed by Postgres
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCustomerRepository::new(pool.clone())),
            Arc::new(PgCreditRepository::new(pool)),
        )
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self::new(
            Arc::new(InMemoryCustomerRepository::new(store.clone())),
            Arc::new(InMemoryCreditRepository::new(store)),
        )
    }

    pub fn customer_handler(&self) -> CustomerHandler {
        CustomerHandler::new(self.customers.clone())
    }

    pub fn create_credit_handler(&self) -> CreateCreditHandler {
        CreateCreditHandler::new(self.customers.clone(), self.credits.clone())
    }

    pub fn find_credit_handler(&self) -> FindCreditHandler {
        FindCreditHandler::new(self.customers.clone(), self.credits.clone())
    }

    pub fn list_credits_handler(&self) -> ListCreditsHandler {
        ListCreditsHandler::new(self.credits.clone())
    }
}
