//! Repository Errors

/// Unique constraint on `customers.email`
pub const EMAIL_CONSTRAINT: &str = "customers_email_key";

/// Unique constraint on `customers.tax_id`
pub const TAX_ID_CONSTRAINT: &str = "customers_tax_id_key";

/// Errors that can occur in a repository
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Unique constraint violated (duplicate email or tax id)
    #[error("{0}")]
    Conflict(String),

    /// Referenced customer does not exist
    #[error("Customer {0} not found")]
    CustomerNotFound(i64),

    /// Stored data could not be mapped back to a domain type
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict("Record already exists".to_string())
            }
            _ => RepositoryError::Database(err),
        }
    }
}

impl RepositoryError {
    pub fn duplicate_email(email: &str) -> Self {
        Self::Conflict(format!("Email {} already registered", email))
    }

    pub fn duplicate_tax_id(tax_id: &str) -> Self {
        Self::Conflict(format!("Tax id {} already registered", tax_id))
    }

    /// Map a failed customer insert, naming the duplicated field
    pub fn on_customer_insert(err: sqlx::Error, email: &str, tax_id: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                match db_err.constraint() {
                    Some(EMAIL_CONSTRAINT) => Self::duplicate_email(email),
                    Some(TAX_ID_CONSTRAINT) => Self::duplicate_tax_id(tax_id),
                    _ => err.into(),
                }
            }
            _ => err.into(),
        }
    }

    /// Map a failed credit insert; a missing owner surfaces as not found
    pub fn on_credit_insert(err: sqlx::Error, customer_id: i64) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::CustomerNotFound(customer_id)
            }
            _ => err.into(),
        }
    }

    /// Check if this error is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }
}
