//! Budget period repository backed by `budgets.json`
//!
//! Periods keep their insertion order on disk and in memory. Active-budget
//! lookup picks the first listed match, so the order is part of the data.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendcastError;
use crate::models::{BudgetId, BudgetPeriod};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, single_match};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<BudgetPeriod>,
}

pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<Vec<BudgetPeriod>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendcastError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        *budgets = file_data.budgets;
        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendcastError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<BudgetPeriod>, SpendcastError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.iter().find(|b| b.id == id).cloned())
    }

    /// All periods in stored order
    pub fn get_all(&self) -> Result<Vec<BudgetPeriod>, SpendcastError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.clone())
    }

    /// Look up by ID (full or short) or by exact name, ignoring case
    pub fn find(&self, reference: &str) -> Result<Option<BudgetPeriod>, SpendcastError> {
        let budgets = self.budgets.read().map_err(lock_error)?;

        if let Some(by_name) = budgets
            .iter()
            .find(|b| same_name(&b.name, reference))
        {
            return Ok(Some(by_name.clone()));
        }

        let matches: Vec<_> = budgets
            .iter()
            .filter(|b| b.id.matches(reference))
            .cloned()
            .collect();
        single_match(matches, reference)
    }

    /// Replace the period with the same ID in place, or append a new one
    pub fn upsert(&self, period: BudgetPeriod) -> Result<(), SpendcastError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        match budgets.iter_mut().find(|b| b.id == period.id) {
            Some(existing) => *existing = period,
            None => budgets.push(period),
        }
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<Option<BudgetPeriod>, SpendcastError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        let position = budgets.iter().position(|b| b.id == id);
        Ok(position.map(|index| budgets.remove(index)))
    }

    /// Whether another period already uses `name`
    pub fn name_taken(&self, name: &str, except: Option<BudgetId>) -> Result<bool, SpendcastError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets
            .iter()
            .any(|b| Some(b.id) != except && same_name(&b.name, name)))
    }

    pub fn count(&self) -> Result<usize, SpendcastError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.len())
    }
}

/// Names compare trimmed and case-folded, including non-ASCII letters
fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
