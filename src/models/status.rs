//! Derived budget status
//!
//! Never persisted; rebuilt from the budget definition and the transaction
//! store on every read.

use serde::{Deserialize, Serialize};

use super::ids::BudgetId;
use super::money::Money;
use super::period::DateWindow;

/// Spend against one category allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatus {
    pub category: String,
    pub allocated: Money,
    pub spent: Money,
    pub remaining: Money,
    pub overspent: bool,
}

impl CategoryStatus {
    /// Share of the allocation spent, as a percentage (may exceed 100)
    pub fn percent_used(&self) -> f64 {
        if self.allocated.is_zero() {
            return 0.0;
        }
        self.spent.cents() as f64 / self.allocated.cents() as f64 * 100.0
    }
}

/// Status report for a budget period in one resolved window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub period_id: BudgetId,
    pub name: String,
    pub window: DateWindow,
    pub overall_amount: Money,
    pub total_spent_overall: Money,
    /// Negative when overspent
    pub overall_remaining: Money,
    pub overspent: bool,
    pub per_category: Vec<CategoryStatus>,
}

impl BudgetStatus {
    pub fn overspent_categories(&self) -> impl Iterator<Item = &CategoryStatus> {
        self.per_category.iter().filter(|c| c.overspent)
    }
}
