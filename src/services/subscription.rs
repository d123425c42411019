//! Subscription service
//!
//! Tracks recurring charges and reports which ones are billed on a given
//! day. Payments themselves are recorded as ordinary transactions.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{Money, Subscription};
use crate::storage::Storage;

pub struct SubscriptionService<'a> {
    storage: &'a Storage,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(
        &self,
        name: &str,
        amount: Money,
        start_date: NaiveDate,
        next_billing_date: NaiveDate,
    ) -> SpendcastResult<Subscription> {
        let subscription = Subscription::new(name.trim(), amount, start_date, next_billing_date);
        subscription
            .validate()
            .map_err(|e| SpendcastError::Validation(e.to_string()))?;

        self.storage.subscriptions.insert(subscription.clone())?;
        self.storage.subscriptions.save()?;

        self.storage.log_create(
            EntityType::Subscription,
            subscription.id.to_string(),
            Some(subscription.name.clone()),
            &subscription,
        )?;
        info!(subscription = %subscription.id, name = %subscription.name, "added subscription");

        Ok(subscription)
    }

    /// Soonest next billing date first
    pub fn list(&self) -> SpendcastResult<Vec<Subscription>> {
        self.storage.subscriptions.get_all()
    }

    /// Subscriptions billed on `date`
    pub fn due_on(&self, date: NaiveDate) -> SpendcastResult<Vec<Subscription>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|s| s.is_due_on(date))
            .collect())
    }

    pub fn delete(&self, reference: &str) -> SpendcastResult<Subscription> {
        let subscription = self
            .storage
            .subscriptions
            .find(reference)?
            .ok_or_else(|| SpendcastError::subscription_not_found(reference))?;
        self.storage.subscriptions.delete(subscription.id)?;
        self.storage.subscriptions.save()?;

        self.storage.log_delete(
            EntityType::Subscription,
            subscription.id.to_string(),
            Some(subscription.name.clone()),
            &subscription,
        )?;
        info!(subscription = %subscription.id, "deleted subscription");

        Ok(subscription)
    }
}
