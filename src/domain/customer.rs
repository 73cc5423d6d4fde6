//! Customer entity
//!
//! A registered customer, the data needed to register one, and the subset
//! of fields a customer may change afterwards.

use rand::RngCore;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// A persisted customer
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub income: Decimal,
    pub email: String,
    pub password: PasswordHash,
    pub zip_code: String,
    pub street: String,
}

/// A customer that has passed validation but has no id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub income: Decimal,
    pub email: String,
    pub password: PasswordHash,
    pub zip_code: String,
    pub street: String,
}

impl NewCustomer {
    /// Attach the store-generated id
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            tax_id: self.tax_id,
            income: self.income,
            email: self.email,
            password: self.password,
            zip_code: self.zip_code,
            street: self.street,
        }
    }
}

/// Fields a customer may update after registration
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerChanges {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl Customer {
    /// Apply an update, returning the changed customer
    pub fn apply(mut self, changes: CustomerChanges) -> Self {
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.income = changes.income;
        self.zip_code = changes.zip_code;
        self.street = changes.street;
        self
    }
}

/// Salted SHA-256 password digest, stored as `salt_hex$digest_hex`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plain-text password with a fresh random salt
    pub fn generate(plain: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(plain, &salt)
    }

    fn with_salt(plain: &str, salt: &[u8]) -> Self {
        let digest = Sha256::new()
            .chain_update(salt)
            .chain_update(plain.as_bytes())
            .finalize();
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Wrap a digest loaded from storage
    pub fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a plain-text password against this digest
    pub fn verify(&self, plain: &str) -> bool {
        let Some((salt_hex, _)) = self.0.split_once('$') else {
            return false;
        };
        match hex::decode(salt_hex) {
            Ok(salt) => Self::with_salt(plain, &salt) == *self,
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}
