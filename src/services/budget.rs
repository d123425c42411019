//! Budget service
//!
//! Validated create/update/delete for budget periods plus the status
//! queries. Every mutation is saved immediately and audit-logged.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{BudgetDraft, BudgetId, BudgetPeriod, BudgetStatus, DateWindow, Money};
use crate::storage::Storage;

use super::cycle::{active_window, resolve_window};
use super::status::StatusService;

/// Service for budget period management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A stored period together with the window it resolves to on a given day
#[derive(Debug, Clone)]
pub struct BudgetListing {
    pub period: BudgetPeriod,
    pub window: DateWindow,
    pub active: bool,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and persist a new budget period
    pub fn create(&self, draft: BudgetDraft) -> SpendcastResult<BudgetPeriod> {
        let period =
            BudgetPeriod::from_draft(draft).map_err(|e| SpendcastError::Validation(e.to_string()))?;

        if self.storage.budgets.name_taken(&period.name, None)? {
            return Err(SpendcastError::Validation(format!(
                "A budget named '{}' already exists",
                period.name
            )));
        }

        self.storage.budgets.upsert(period.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            period.id.to_string(),
            Some(period.name.clone()),
            &period,
        )?;
        info!(budget = %period.id, name = %period.name, cycle = %period.cycle_type, "created budget");

        Ok(period)
    }

    /// Replace the editable fields of budget `id`.
    ///
    /// The draft is validated as a whole; on error the stored period is
    /// left untouched.
    pub fn update(&self, id: BudgetId, draft: BudgetDraft) -> SpendcastResult<BudgetPeriod> {
        let before = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| SpendcastError::budget_not_found(id.to_string()))?;

        let mut period = before.clone();
        period
            .apply_draft(draft)
            .map_err(|e| SpendcastError::Validation(e.to_string()))?;

        if self.storage.budgets.name_taken(&period.name, Some(id))? {
            return Err(SpendcastError::Validation(format!(
                "A budget named '{}' already exists",
                period.name
            )));
        }

        self.storage.budgets.upsert(period.clone())?;
        self.storage.budgets.save()?;

        let summary = change_summary(&before, &period);
        self.storage.log_update(
            EntityType::Budget,
            period.id.to_string(),
            Some(period.name.clone()),
            &before,
            &period,
            summary.clone(),
        )?;
        info!(budget = %period.id, changes = summary.as_deref().unwrap_or("none"), "updated budget");

        Ok(period)
    }

    pub fn delete(&self, id: BudgetId) -> SpendcastResult<BudgetPeriod> {
        let period = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| SpendcastError::budget_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            period.id.to_string(),
            Some(period.name.clone()),
            &period,
        )?;
        info!(budget = %period.id, name = %period.name, "deleted budget");

        Ok(period)
    }

    pub fn get(&self, id: BudgetId) -> SpendcastResult<Option<BudgetPeriod>> {
        self.storage.budgets.get(id)
    }

    /// Resolve a user reference (name or ID), failing with `NotFound`
    pub fn find(&self, reference: &str) -> SpendcastResult<BudgetPeriod> {
        self.storage
            .budgets
            .find(reference)?
            .ok_or_else(|| SpendcastError::budget_not_found(reference))
    }

    /// All periods in stored order
    pub fn list(&self) -> SpendcastResult<Vec<BudgetPeriod>> {
        self.storage.budgets.get_all()
    }

    /// Every period with the window it resolves to on `as_of`
    pub fn listings(&self, as_of: NaiveDate) -> SpendcastResult<Vec<BudgetListing>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|period| BudgetListing {
                window: resolve_window(&period, as_of),
                active: active_window(&period, as_of).is_some(),
                period,
            })
            .collect())
    }

    pub fn budget_status(
        &self,
        id: BudgetId,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<BudgetStatus> {
        StatusService::new(self.storage).budget_status(id, as_of)
    }

    pub fn active_budget_status(
        &self,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<Option<BudgetStatus>> {
        StatusService::new(self.storage).active_budget_status(as_of)
    }

    /// Recent per-category spend, shown while choosing allocations
    pub fn category_spending(
        &self,
        window_days: u32,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<BTreeMap<String, Money>> {
        debug!(window_days, "previewing category spending");
        StatusService::new(self.storage).category_spending(window_days, as_of)
    }
}

/// Describe which editable fields differ between two versions of a period
fn change_summary(before: &BudgetPeriod, after: &BudgetPeriod) -> Option<String> {
    let mut changes = Vec::new();

    if before.name != after.name {
        changes.push(format!("name: \"{}\" -> \"{}\"", before.name, after.name));
    }
    if before.overall_amount != after.overall_amount {
        changes.push(format!(
            "overall: {} -> {}",
            before.overall_amount, after.overall_amount
        ));
    }
    if before.cycle_type != after.cycle_type {
        changes.push(format!("cycle: {} -> {}", before.cycle_type, after.cycle_type));
    }
    if before.start_date != after.start_date || before.end_date != after.end_date {
        changes.push(format!(
            "dates: {}..{} -> {}..{}",
            before.start_date, before.end_date, after.start_date, after.end_date
        ));
    }
    if before.category_allocations != after.category_allocations {
        changes.push(format!(
            "allocations: {} ({}) -> {} ({})",
            before.category_allocations.len(),
            before.allocated_total(),
            after.category_allocations.len(),
            after.allocated_total()
        ));
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}
