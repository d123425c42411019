//! Storage layer for spendcast
//!
//! JSON file repositories with atomic writes, coordinated by [`Storage`],
//! which also owns the audit log.

pub mod budget;
pub mod file_io;
pub mod subscriptions;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use subscriptions::SubscriptionRepository;
pub use transactions::TransactionRepository;

use std::sync::PoisonError;

use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendcastPaths;
use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{BudgetPeriod, DateWindow, Transaction, TransactionKind};
use crate::services::LedgerQuery;

/// Owns every repository plus the audit log
pub struct Storage {
    paths: SpendcastPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub subscriptions: SubscriptionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create storage rooted at `paths`, creating directories as needed
    pub fn new(paths: SpendcastPaths) -> Result<Self, SpendcastError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            subscriptions: SubscriptionRepository::new(paths.subscriptions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendcastPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendcastError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.subscriptions.load()?;
        debug!(
            base_dir = %self.paths.base_dir().display(),
            transactions = self.transactions.count()?,
            budgets = self.budgets.count()?,
            "loaded storage"
        );
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendcastResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendcastResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendcastResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl LedgerQuery for Storage {
    fn list_budget_periods(&self) -> SpendcastResult<Vec<BudgetPeriod>> {
        self.budgets.get_all()
    }

    fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
        range: Option<DateWindow>,
    ) -> SpendcastResult<Vec<Transaction>> {
        self.transactions.list(kind, range)
    }
}

pub(crate) fn lock_error<T>(e: PoisonError<T>) -> SpendcastError {
    SpendcastError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Collapse lookup candidates: none, exactly one, or an ambiguous reference
pub(crate) fn single_match<T>(mut matches: Vec<T>, reference: &str) -> SpendcastResult<Option<T>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => Err(SpendcastError::Validation(format!(
            "'{}' is ambiguous ({} matches); use more of the ID",
            reference, n
        ))),
    }
}
