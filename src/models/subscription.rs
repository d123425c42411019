//! Recurring subscription model
//!
//! Tracks what a subscription costs and when it is next billed, so due
//! subscriptions can be surfaced as reminders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SubscriptionId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub amount: Money,
    pub start_date: NaiveDate,
    pub next_billing_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
        next_billing_date: NaiveDate,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            name: name.into(),
            amount,
            start_date,
            next_billing_date,
            created_at: Utc::now(),
        }
    }

    /// Whether the subscription is billed on `date`
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.next_billing_date == date
    }

    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(SubscriptionValidationError::NonPositiveAmount);
        }
        if self.next_billing_date < self.start_date {
            return Err(SubscriptionValidationError::BillingBeforeStart);
        }
        Ok(())
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (next: {})",
            self.name,
            self.amount,
            self.next_billing_date.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionValidationError {
    EmptyName,
    NonPositiveAmount,
    BillingBeforeStart,
}

impl fmt::Display for SubscriptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subscription name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Subscription amount must be positive"),
            Self::BillingBeforeStart => {
                write!(f, "Next billing date cannot be before the start date")
            }
        }
    }
}

impl std::error::Error for SubscriptionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_on() {
        let sub = Subscription::new(
            "Streaming",
            Money::from_cents(1599),
            date(2024, 1, 5),
            date(2024, 3, 5),
        );
        assert!(sub.is_due_on(date(2024, 3, 5)));
        assert!(!sub.is_due_on(date(2024, 3, 6)));
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let sub = Subscription::new("Gym", Money::zero(), date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(
            sub.validate(),
            Err(SubscriptionValidationError::NonPositiveAmount)
        );

        let sub = Subscription::new(
            "Gym",
            Money::from_units(30),
            date(2024, 2, 1),
            date(2024, 1, 1),
        );
        assert_eq!(
            sub.validate(),
            Err(SubscriptionValidationError::BillingBeforeStart)
        );
    }
}
