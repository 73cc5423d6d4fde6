//! In-memory repositories
//!
//! Both repositories share one [`InMemoryStore`], so the customer/credit
//! relationship (foreign key, cascade delete) holds just like in Postgres.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Credit, Customer, NewCustomer};

use super::{CreditRepository, CustomerRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Tables {
    next_customer_id: i64,
    customers: BTreeMap<i64, Customer>,
    credits: HashMap<Uuid, Credit>,
}

impl Tables {
    fn check_unique(&self, email: &str, tax_id: &str) -> RepositoryResult<()> {
        for existing in self.customers.values() {
            if existing.email == email {
                return Err(RepositoryError::duplicate_email(email));
            }
            if existing.tax_id == tax_id {
                return Err(RepositoryError::duplicate_tax_id(tax_id));
            }
        }
        Ok(())
    }
}

/// Shared tables for the in-memory repositories
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory [`CustomerRepository`]
#[derive(Debug, Clone)]
pub struct InMemoryCustomerRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCustomerRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut tables = self.store.tables.write().await;
        tables.check_unique(&customer.email, &customer.tax_id)?;

        tables.next_customer_id += 1;
        let saved = customer.clone().with_id(tables.next_customer_id);
        tables.customers.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        let tables = self.store.tables.read().await;
        Ok(tables.customers.get(&id).cloned())
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let mut tables = self.store.tables.write().await;
        match tables.customers.get_mut(&customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(customer.clone())
            }
            None => Err(RepositoryError::CustomerNotFound(customer.id)),
        }
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut tables = self.store.tables.write().await;
        if tables.customers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.credits.retain(|_, credit| credit.customer_id != id);
        Ok(true)
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        let mut tables = self.store.tables.write().await;
        tables.credits.clear();
        tables.customers.clear();
        Ok(())
    }
}

/// In-memory [`CreditRepository`]
#[derive(Debug, Clone)]
pub struct InMemoryCreditRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCreditRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CreditRepository for InMemoryCreditRepository {
    async fn save(&self, credit: &Credit) -> RepositoryResult<Credit> {
        let mut tables = self.store.tables.write().await;
        if !tables.customers.contains_key(&credit.customer_id) {
            return Err(RepositoryError::CustomerNotFound(credit.customer_id));
        }
        if tables.credits.contains_key(&credit.credit_code) {
            return Err(RepositoryError::Conflict(format!(
                "Credit code {} already exists",
                credit.credit_code
            )));
        }
        tables.credits.insert(credit.credit_code, credit.clone());
        Ok(credit.clone())
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>> {
        let tables = self.store.tables.read().await;
        Ok(tables.credits.get(&credit_code).cloned())
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .credits
            .values()
            .filter(|credit| credit.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.store.tables.write().await.credits.clear();
        Ok(())
    }
}
