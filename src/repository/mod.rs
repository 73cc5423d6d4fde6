//! Repository module
//!
//! Persistence contracts for customers and credits. Handlers receive these
//! as trait objects, so the same request logic runs against Postgres in
//! production and the in-memory store in tests.

mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Credit, Customer, NewCustomer};

pub use error::RepositoryError;
pub use memory::{InMemoryCreditRepository, InMemoryCustomerRepository, InMemoryStore};
pub use postgres::{PgCreditRepository, PgCustomerRepository};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Customer storage
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer and return it with its generated id.
    /// Fails with [`RepositoryError::Conflict`] on a duplicate email or tax id.
    async fn save(&self, customer: &NewCustomer) -> RepositoryResult<Customer>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>>;

    /// Overwrite the mutable fields of an existing customer
    async fn update(&self, customer: &Customer) -> RepositoryResult<Customer>;

    /// Delete a customer together with all of its credits.
    /// Returns false if no customer had this id.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    async fn delete_all(&self) -> RepositoryResult<()>;
}

/// Credit storage
#[async_trait]
pub trait CreditRepository: Send + Sync {
    async fn save(&self, credit: &Credit) -> RepositoryResult<Credit>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>>;

    /// All credits of one customer, in no particular order
    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>>;

    async fn delete_all(&self) -> RepositoryResult<()>;
}
