//! Budget period model
//!
//! A budget period is a named spending cap over a recurring or one-off date
//! range, with optional per-category sub-caps ("allocations"). Allocation
//! order is kept exactly as entered because it is the display order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::CycleType;

/// A category-specific portion of a budget period's overall amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: String,
    pub amount: Money,
}

impl CategoryAllocation {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// User-supplied fields for creating or editing a budget period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    pub name: String,
    pub overall_amount: Money,
    #[serde(default)]
    pub cycle_type: CycleType,
    pub start_date: NaiveDate,
    /// Only meaningful (and required) for custom cycles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_allocations: Vec<CategoryAllocation>,
}

impl BudgetDraft {
    /// Start a draft with no allocations
    pub fn new(
        name: impl Into<String>,
        overall_amount: Money,
        cycle_type: CycleType,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            overall_amount,
            cycle_type,
            start_date,
            end_date: None,
            category_allocations: Vec::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_allocation(mut self, category: impl Into<String>, amount: Money) -> Self {
        self.category_allocations
            .push(CategoryAllocation::new(category, amount));
        self
    }

    /// Check every invariant of a budget period and return the resolved end
    /// date (derived for recurring cycles, supplied for custom ones)
    pub fn validate(&self) -> Result<NaiveDate, BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if !self.overall_amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveOverall);
        }

        let end_date = match (self.cycle_type, self.end_date) {
            (CycleType::Custom, None) => return Err(BudgetValidationError::MissingEndDate),
            (CycleType::Custom, Some(end)) if end < self.start_date => {
                return Err(BudgetValidationError::EndBeforeStart)
            }
            (CycleType::Custom, Some(end)) => end,
            (cycle, Some(_)) => return Err(BudgetValidationError::DerivedEndDateSupplied(cycle)),
            (cycle, None) => cycle
                .first_window_end(self.start_date)
                .ok_or(BudgetValidationError::DateOutOfRange)?,
        };

        let mut seen = HashSet::new();
        for allocation in &self.category_allocations {
            let category = allocation.category.trim();
            if category.is_empty() {
                return Err(BudgetValidationError::EmptyCategory);
            }
            if !allocation.amount.is_positive() {
                return Err(BudgetValidationError::NonPositiveAllocation(
                    category.to_string(),
                ));
            }
            if !seen.insert(category) {
                return Err(BudgetValidationError::DuplicateCategory(category.to_string()));
            }
        }

        let allocated: Money = self.category_allocations.iter().map(|a| a.amount).sum();
        if allocated > self.overall_amount {
            return Err(BudgetValidationError::AllocationsExceedOverall {
                allocated,
                overall: self.overall_amount,
            });
        }

        Ok(end_date)
    }
}

/// A stored budget period definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPeriod {
    pub id: BudgetId,
    pub name: String,
    pub overall_amount: Money,
    pub cycle_type: CycleType,
    pub start_date: NaiveDate,
    /// Supplied end for custom cycles; end of the first window otherwise
    pub end_date: NaiveDate,
    #[serde(default)]
    pub category_allocations: Vec<CategoryAllocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetPeriod {
    /// Build a new period from a validated draft
    pub fn from_draft(draft: BudgetDraft) -> Result<Self, BudgetValidationError> {
        let end_date = draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: BudgetId::new(),
            name: draft.name.trim().to_string(),
            overall_amount: draft.overall_amount,
            cycle_type: draft.cycle_type,
            start_date: draft.start_date,
            end_date,
            category_allocations: normalize_allocations(draft.category_allocations),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the editable fields. Nothing changes if the draft is invalid.
    pub fn apply_draft(&mut self, draft: BudgetDraft) -> Result<(), BudgetValidationError> {
        let end_date = draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.overall_amount = draft.overall_amount;
        self.cycle_type = draft.cycle_type;
        self.start_date = draft.start_date;
        self.end_date = end_date;
        self.category_allocations = normalize_allocations(draft.category_allocations);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The editable fields of this period, e.g. as the base of an edit
    pub fn to_draft(&self) -> BudgetDraft {
        BudgetDraft {
            name: self.name.clone(),
            overall_amount: self.overall_amount,
            cycle_type: self.cycle_type,
            start_date: self.start_date,
            end_date: (!self.cycle_type.is_recurring()).then_some(self.end_date),
            category_allocations: self.category_allocations.clone(),
        }
    }

    /// Sum of all category allocations
    pub fn allocated_total(&self) -> Money {
        self.category_allocations.iter().map(|a| a.amount).sum()
    }

    /// Overall amount not assigned to any category
    pub fn unallocated(&self) -> Money {
        self.overall_amount - self.allocated_total()
    }

    pub fn has_allocation(&self, category: &str) -> bool {
        self.category_allocations
            .iter()
            .any(|a| a.category == category)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} from {})",
            self.name,
            self.overall_amount,
            self.cycle_type,
            self.start_date.format("%Y-%m-%d")
        )
    }
}

fn normalize_allocations(allocations: Vec<CategoryAllocation>) -> Vec<CategoryAllocation> {
    allocations
        .into_iter()
        .map(|a| CategoryAllocation::new(a.category.trim(), a.amount))
        .collect()
}

/// Validation errors for budget periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveOverall,
    MissingEndDate,
    EndBeforeStart,
    DerivedEndDateSupplied(CycleType),
    DateOutOfRange,
    EmptyCategory,
    NonPositiveAllocation(String),
    DuplicateCategory(String),
    AllocationsExceedOverall { allocated: Money, overall: Money },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveOverall => write!(f, "Overall budget amount must be positive"),
            Self::MissingEndDate => write!(f, "End date is required for a custom cycle"),
            Self::EndBeforeStart => write!(f, "End date cannot be before start date"),
            Self::DerivedEndDateSupplied(cycle) => write!(
                f,
                "End date is derived for {} cycles and cannot be supplied",
                cycle
            ),
            Self::DateOutOfRange => write!(f, "Start date is out of the supported range"),
            Self::EmptyCategory => write!(f, "Allocation category cannot be empty"),
            Self::NonPositiveAllocation(category) => {
                write!(f, "Allocation for '{}' must be positive", category)
            }
            Self::DuplicateCategory(category) => {
                write!(f, "Category '{}' is allocated more than once", category)
            }
            Self::AllocationsExceedOverall { allocated, overall } => write!(
                f,
                "Category allocations ({}) exceed the overall budget ({})",
                allocated, overall
            ),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
