//! Transaction repository backed by `transactions.json`

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendcastError;
use crate::models::{DateWindow, Transaction, TransactionId, TransactionKind};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, single_match};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendcastError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        data.extend(file_data.transactions.into_iter().map(|t| (t.id, t)));
        Ok(())
    }

    /// Write every transaction, newest first
    pub fn save(&self) -> Result<(), SpendcastError> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, SpendcastError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All transactions, newest date first
    pub fn get_all(&self) -> Result<Vec<Transaction>, SpendcastError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Transactions matching `kind` (any when `None`) inside `range`
    pub fn list(
        &self,
        kind: Option<TransactionKind>,
        range: Option<DateWindow>,
    ) -> Result<Vec<Transaction>, SpendcastError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .filter(|t| range.map_or(true, |r| r.contains(t.date)))
            .collect())
    }

    /// Look up by full or short ID; an ambiguous prefix is an error
    pub fn find(&self, reference: &str) -> Result<Option<Transaction>, SpendcastError> {
        let data = self.data.read().map_err(lock_error)?;
        let matches: Vec<_> = data
            .values()
            .filter(|t| t.id.matches(reference))
            .cloned()
            .collect();
        single_match(matches, reference)
    }

    pub fn insert(&self, txn: Transaction) -> Result<(), SpendcastError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove and return the transaction, if present
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, SpendcastError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, SpendcastError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_save_reload() {
        let (_temp, repo) = create_test_repo();
        let txn = Transaction::expense(Money::from_cents(1250), "Food", date(2024, 3, 2))
            .with_note("groceries");
        repo.insert(txn.clone()).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        assert_eq!(repo.get(txn.id).unwrap(), Some(txn));
    }

    #[test]
    fn test_list_filters_kind_and_range() {
        let (_temp, repo) = create_test_repo();
        repo.insert(Transaction::expense(Money::from_units(5), "Food", date(2024, 3, 1)))
            .unwrap();
        repo.insert(Transaction::expense(Money::from_units(7), "Food", date(2024, 4, 1)))
            .unwrap();
        repo.insert(Transaction::income(Money::from_units(9), "Salary", date(2024, 3, 15)))
            .unwrap();

        let march = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31));
        let expenses = repo.list(Some(TransactionKind::Expense), Some(march)).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, Money::from_units(5));

        let everything = repo.list(None, None).unwrap();
        assert_eq!(everything.len(), 3);
        assert_eq!(everything[0].date, date(2024, 4, 1));
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp, repo) = create_test_repo();
        let txn = Transaction::expense(Money::from_units(5), "Food", date(2024, 3, 1));
        repo.insert(txn.clone()).unwrap();

        let found = repo.find(&txn.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, txn.id);

        assert!(repo.delete(txn.id).unwrap().is_some());
        assert!(repo.delete(txn.id).unwrap().is_none());
        assert!(repo.find(&txn.id.to_string()).unwrap().is_none());
    }
}
