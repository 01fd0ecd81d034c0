//! # Customer Store
//!
//! Stored customer records and the in-memory directory over them.
//!
//! ## Dual-Key Identity Pattern
//! Every record has:
//! - `id`: UUID v4 - immutable, never shown to users
//! - `customer_id`: business key (CUST001) - human-readable, what orders
//!   and lookups speak
//!
//! ## Read Boundary
//! ```text
//! StoredCustomer (name, email, status, audit timestamps, ...)
//!        │ to_record()
//!        ▼
//! CustomerRecord (exists, active, credit figures)  ──► gate-core
//! ```
//! The core never sees the extra fields; the store never sees verdicts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use gate_core::{CustomerDirectory, CustomerRecord, Money};

use crate::error::{DirectoryError, DirectoryResult};

// =============================================================================
// Customer Status
// =============================================================================

/// Whether a customer may place orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, CustomerStatus::Active)
    }
}

// =============================================================================
// Stored Customer
// =============================================================================

/// A customer as the store keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCustomer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business key - what orders reference.
    pub customer_id: String,

    /// Display name.
    pub name: String,

    /// Contact address, when known.
    pub email: Option<String>,

    /// Whether the customer may place orders.
    pub status: CustomerStatus,

    /// Credit limit in cents.
    pub credit_limit_cents: i64,

    /// Credit already consumed, in cents. Invariant: ≤ credit_limit_cents.
    pub used_credit_cents: i64,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl StoredCustomer {
    /// Creates a record with a fresh UUID and current timestamps.
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        status: CustomerStatus,
        credit_limit_cents: i64,
        used_credit_cents: i64,
    ) -> Self {
        let now = Utc::now();
        StoredCustomer {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            name: name.into(),
            email: None,
            status,
            credit_limit_cents,
            used_credit_cents,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the contact address (builder style, used by fixtures).
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Maps down to the narrow record the validation core consumes.
    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord {
            customer_id: self.customer_id.clone(),
            exists: true,
            active: self.status.is_active(),
            credit_limit: Money::from_cents(self.credit_limit_cents),
            used_credit: Money::from_cents(self.used_credit_cents),
        }
    }

    /// Checks the store invariants for this record.
    fn check_invariants(&self) -> DirectoryResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(DirectoryError::InvalidRecord {
                customer_id: self.customer_id.clone(),
                reason: "customer_id must not be empty".to_string(),
            });
        }
        if self.credit_limit_cents < 0 || self.used_credit_cents < 0 {
            return Err(DirectoryError::InvalidRecord {
                customer_id: self.customer_id.clone(),
                reason: "credit figures must be non-negative".to_string(),
            });
        }
        if self.used_credit_cents > self.credit_limit_cents {
            return Err(DirectoryError::InvalidRecord {
                customer_id: self.customer_id.clone(),
                reason: "used credit exceeds credit limit".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Customer Seed
// =============================================================================

/// The human-authored seed shape accepted by [`InMemoryDirectory::from_json`].
///
/// Credit figures are decimals here (seed files are written by hand) and
/// converted to cents on load with the same rounding the core applies to
/// payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSeed {
    pub customer_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: CustomerStatus,
    pub credit_limit: f64,
    pub used_credit: f64,
}

impl From<CustomerSeed> for StoredCustomer {
    fn from(seed: CustomerSeed) -> Self {
        let mut customer = StoredCustomer::new(
            seed.customer_id,
            seed.name,
            seed.status,
            Money::from_decimal(seed.credit_limit).cents(),
            Money::from_decimal(seed.used_credit).cents(),
        );
        customer.email = seed.email;
        customer
    }
}

// =============================================================================
// In-Memory Directory
// =============================================================================

/// The in-memory customer directory.
///
/// Immutable once handed to a validator, which makes concurrent reads
/// trivially safe (wrap in `Arc` to share). Hosts that need a live store
/// own their own locking; the core only requires the read contract.
///
/// ## Usage
/// ```rust
/// use gate_directory::InMemoryDirectory;
/// use gate_core::CustomerDirectory;
///
/// let directory = InMemoryDirectory::with_fixtures();
///
/// let record = directory.lookup("CUST001");
/// assert!(record.exists && record.active);
///
/// let record = directory.lookup("CUST999");
/// assert!(!record.exists);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    customers: HashMap<String, StoredCustomer>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        InMemoryDirectory {
            customers: HashMap::new(),
        }
    }

    /// Demo fixture set: five customers spanning the interesting shapes —
    /// roomy credit, nearly exhausted credit, and an inactive account.
    ///
    /// | key     | name               | status   | limit  | used   |
    /// |---------|--------------------|----------|--------|--------|
    /// | CUST001 | Acme Corporation   | active   | 10 000 |  2 000 |
    /// | CUST002 | TechStart Inc      | active   |  5 000 |  4 500 |
    /// | CUST003 | Global Solutions   | inactive | 15 000 |      0 |
    /// | CUST004 | Innovation Labs    | active   |  8 000 |  1 000 |
    /// | CUST005 | Enterprise Systems | active   | 20 000 | 15 000 |
    pub fn with_fixtures() -> Self {
        let mut directory = InMemoryDirectory::new();
        let fixtures = [
            StoredCustomer::new("CUST001", "Acme Corporation", CustomerStatus::Active, 1_000_000, 200_000)
                .with_email("contact@acme.com"),
            StoredCustomer::new("CUST002", "TechStart Inc", CustomerStatus::Active, 500_000, 450_000)
                .with_email("info@techstart.com"),
            StoredCustomer::new("CUST003", "Global Solutions", CustomerStatus::Inactive, 1_500_000, 0)
                .with_email("sales@globalsolutions.com"),
            StoredCustomer::new("CUST004", "Innovation Labs", CustomerStatus::Active, 800_000, 100_000)
                .with_email("hello@innovationlabs.com"),
            StoredCustomer::new("CUST005", "Enterprise Systems", CustomerStatus::Active, 2_000_000, 1_500_000)
                .with_email("contact@enterprise.com"),
        ];

        for customer in fixtures {
            // Fixtures are static and valid; insert cannot fail here.
            directory
                .insert(customer)
                .expect("fixture set must satisfy store invariants");
        }
        directory
    }

    /// Builds a directory from a JSON array of [`CustomerSeed`] records.
    ///
    /// ## Seed Format
    /// ```json
    /// [
    ///   {
    ///     "customer_id": "CUST010",
    ///     "name": "Northwind Trading",
    ///     "email": "orders@northwind.example",
    ///     "status": "active",
    ///     "credit_limit": 2500.0,
    ///     "used_credit": 100.0
    ///   }
    /// ]
    /// ```
    pub fn from_json(text: &str) -> DirectoryResult<Self> {
        let seeds: Vec<CustomerSeed> = serde_json::from_str(text)?;

        let mut directory = InMemoryDirectory::new();
        for seed in seeds {
            directory.insert(StoredCustomer::from(seed))?;
        }
        Ok(directory)
    }

    /// Inserts a record, enforcing invariants and business-key uniqueness.
    pub fn insert(&mut self, customer: StoredCustomer) -> DirectoryResult<()> {
        customer.check_invariants()?;

        if self.customers.contains_key(&customer.customer_id) {
            return Err(DirectoryError::DuplicateCustomer {
                customer_id: customer.customer_id,
            });
        }

        self.customers.insert(customer.customer_id.clone(), customer);
        Ok(())
    }

    /// Returns the stored record for a business key, if present.
    pub fn get(&self, customer_id: &str) -> Option<&StoredCustomer> {
        self.customers.get(customer_id)
    }

    /// Number of customers on file.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// True when no customers are on file.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryDirectory {
    fn lookup(&self, customer_id: &str) -> CustomerRecord {
        let record = self
            .customers
            .get(customer_id)
            .map(StoredCustomer::to_record)
            .unwrap_or_else(|| CustomerRecord::not_found(customer_id));

        debug!(customer_id, exists = record.exists, "directory lookup");
        record
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
