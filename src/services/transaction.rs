//! Transaction service
//!
//! Records income and expenses. Transactions are never edited; a mistake is
//! fixed by deleting and re-adding.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{DateWindow, Money, Transaction, TransactionKind};
use crate::storage::Storage;

pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub range: Option<DateWindow>,
    pub limit: Option<usize>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn add(
        &self,
        kind: TransactionKind,
        amount: Money,
        category: &str,
        date: NaiveDate,
        note: Option<&str>,
    ) -> SpendcastResult<Transaction> {
        let mut txn = Transaction::new(kind, amount, category.trim(), date);
        if let Some(note) = note {
            txn = txn.with_note(note.trim());
        }
        txn.validate()
            .map_err(|e| SpendcastError::Validation(e.to_string()))?;

        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage
            .log_create(EntityType::Transaction, txn.id.to_string(), None, &txn)?;
        info!(
            transaction = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            category = %txn.category,
            "recorded transaction"
        );

        Ok(txn)
    }

    /// Newest first, filtered and truncated per `filter`
    pub fn list(&self, filter: &TransactionFilter) -> SpendcastResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.list(filter.kind, filter.range)?;
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Resolve a user reference (full or short ID)
    pub fn find(&self, reference: &str) -> SpendcastResult<Transaction> {
        self.storage
            .transactions
            .find(reference)?
            .ok_or_else(|| SpendcastError::transaction_not_found(reference))
    }

    pub fn delete(&self, reference: &str) -> SpendcastResult<Transaction> {
        let txn = self.find(reference)?;
        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        self.storage
            .log_delete(EntityType::Transaction, txn.id.to_string(), None, &txn)?;
        info!(transaction = %txn.id, "deleted transaction");

        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendcastPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendcastPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .add(TransactionKind::Expense, Money::from_units(12), " Food ", date(2024, 3, 1), None)
            .unwrap();
        service
            .add(TransactionKind::Income, Money::from_units(900), "Salary", date(2024, 3, 2), Some("March"))
            .unwrap();

        let all = service.list(&TransactionFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].note, "March");
        assert_eq!(all[1].category, "Food");

        let expenses = service
            .list(&TransactionFilter {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(expenses.len(), 1);

        let limited = service
            .list(&TransactionFilter {
                limit: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(limited[0].category, "Salary");
    }

    #[test]
    fn test_invalid_transactions_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let zero = service.add(TransactionKind::Expense, Money::zero(), "Food", date(2024, 3, 1), None);
        assert!(zero.unwrap_err().is_validation());

        let blank = service.add(TransactionKind::Expense, Money::from_units(1), "  ", date(2024, 3, 1), None);
        assert!(blank.unwrap_err().is_validation());

        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_by_short_id() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .add(TransactionKind::Expense, Money::from_units(5), "Food", date(2024, 3, 1), None)
            .unwrap();

        let deleted = service.delete(&txn.id.short()).unwrap();
        assert_eq!(deleted.id, txn.id);
        assert!(service.delete(&txn.id.short()).unwrap_err().is_not_found());
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }
}
