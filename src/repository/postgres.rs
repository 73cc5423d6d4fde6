//! Postgres repositories

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Credit, CreditStatus, Customer, NewCustomer, PasswordHash};

use super::{CreditRepository, CustomerRepository, RepositoryError, RepositoryResult};

type CustomerRow = (i64, String, String, String, Decimal, String, String, String, String);

type CreditRow = (Uuid, Decimal, NaiveDate, i32, String, i64);

fn customer_from_row(row: CustomerRow) -> Customer {
    let (id, first_name, last_name, tax_id, income, email, password_hash, zip_code, street) = row;
    Customer {
        id,
        first_name,
        last_name,
        tax_id,
        income,
        email,
        password: PasswordHash::from_stored(password_hash),
        zip_code,
        street,
    }
}

fn credit_from_row(row: CreditRow) -> RepositoryResult<Credit> {
    let (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id) =
        row;
    let status: CreditStatus = status.parse().map_err(RepositoryError::InvalidData)?;
    Ok(Credit {
        credit_code,
        credit_value,
        day_first_installment,
        number_of_installments,
        status,
        customer_id,
    })
}

// =========================================================================
// Customers
// =========================================================================

/// Customer repository backed by the `customers` table
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn save(&self, customer: &NewCustomer) -> RepositoryResult<Customer> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers
                (first_name, last_name, tax_id, income, email, password_hash, zip_code, street)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.tax_id)
        .bind(customer.income)
        .bind(&customer.email)
        .bind(customer.password.as_str())
        .bind(&customer.zip_code)
        .bind(&customer.street)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            RepositoryError::on_customer_insert(err, &customer.email, &customer.tax_id)
        })?;

        tracing::debug!(customer_id = id, "Customer inserted");
        Ok(customer.clone().with_id(id))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, tax_id, income, email, password_hash, zip_code, street
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(customer_from_row))
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, income = $4, zip_code = $5, street = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.income)
        .bind(&customer.zip_code)
        .bind(&customer.street)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::CustomerNotFound(customer.id));
        }
        Ok(customer.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut tx = self.pool.begin().await?;

        let credits = sqlx::query("DELETE FROM credits WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let customers = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            customer_id = id,
            credits_removed = credits.rows_affected(),
            "Customer deleted"
        );
        Ok(customers.rows_affected() > 0)
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("TRUNCATE TABLE credits, customers RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =========================================================================
// Credits
// =========================================================================

/// Credit repository backed by the `credits` table
#[derive(Debug, Clone)]
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    async fn save(&self, credit: &Credit) -> RepositoryResult<Credit> {
        sqlx::query(
            r#"
            INSERT INTO credits
                (credit_code, credit_value, day_first_installment, number_of_installments,
                 status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credit.credit_code)
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status.as_str())
        .bind(credit.customer_id)
        .execute(&self.pool)
        .await
        .map_err(|err| RepositoryError::on_credit_insert(err, credit.customer_id))?;

        Ok(credit.clone())
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>> {
        let row: Option<CreditRow> = sqlx::query_as(
            r#"
            SELECT credit_code, credit_value, day_first_installment, number_of_installments,
                   status, customer_id
            FROM credits
            WHERE credit_code = $1
            "#,
        )
        .bind(credit_code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(credit_from_row).transpose()
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>> {
        let rows: Vec<CreditRow> = sqlx::query_as(
            r#"
            SELECT credit_code, credit_value, day_first_installment, number_of_installments,
                   status, customer_id
            FROM credits
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(credit_from_row).collect()
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM credits").execute(&self.pool).await?;
        Ok(())
    }
}
