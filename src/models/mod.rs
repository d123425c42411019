//! Core data models for spendcast
//!
//! Transactions, budget periods with their allocations, subscriptions, and
//! the derived status and forecast reports.

pub mod budget;
pub mod forecast;
pub mod ids;
pub mod money;
pub mod period;
pub mod status;
pub mod subscription;
pub mod summary;
pub mod transaction;

pub use budget::{BudgetDraft, BudgetPeriod, BudgetValidationError, CategoryAllocation};
pub use forecast::{ForecastPoint, ForecastResult};
pub use ids::{BudgetId, SubscriptionId, TransactionId};
pub use money::Money;
pub use period::{CycleType, DateWindow};
pub use status::{BudgetStatus, CategoryStatus};
pub use subscription::Subscription;
pub use summary::LedgerSummary;
pub use transaction::{Transaction, TransactionKind};
