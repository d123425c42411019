//! Subscription repository backed by `subscriptions.json`

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendcastError;
use crate::models::{Subscription, SubscriptionId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, single_match};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SubscriptionData {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

pub struct SubscriptionRepository {
    path: PathBuf,
    subscriptions: RwLock<Vec<Subscription>>,
}

impl SubscriptionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            subscriptions: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendcastError> {
        let file_data: SubscriptionData = read_json(&self.path)?;
        let mut subscriptions = self.subscriptions.write().map_err(lock_error)?;
        *subscriptions = file_data.subscriptions;
        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendcastError> {
        let subscriptions = self.subscriptions.read().map_err(lock_error)?;
        let file_data = SubscriptionData {
            subscriptions: subscriptions.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All subscriptions, soonest next billing date first
    pub fn get_all(&self) -> Result<Vec<Subscription>, SpendcastError> {
        let subscriptions = self.subscriptions.read().map_err(lock_error)?;
        let mut all = subscriptions.clone();
        all.sort_by(|a, b| {
            a.next_billing_date
                .cmp(&b.next_billing_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(all)
    }

    /// Look up by ID (full or short) or by exact name, ignoring case
    pub fn find(&self, reference: &str) -> Result<Option<Subscription>, SpendcastError> {
        let subscriptions = self.subscriptions.read().map_err(lock_error)?;
        let matches: Vec<_> = subscriptions
            .iter()
            .filter(|s| s.id.matches(reference) || s.name.eq_ignore_ascii_case(reference.trim()))
            .cloned()
            .collect();
        single_match(matches, reference)
    }

    pub fn insert(&self, subscription: Subscription) -> Result<(), SpendcastError> {
        let mut subscriptions = self.subscriptions.write().map_err(lock_error)?;
        subscriptions.push(subscription);
        Ok(())
    }

    pub fn delete(&self, id: SubscriptionId) -> Result<Option<Subscription>, SpendcastError> {
        let mut subscriptions = self.subscriptions.write().map_err(lock_error)?;
        let position = subscriptions.iter().position(|s| s.id == id);
        Ok(position.map(|index| subscriptions.remove(index)))
    }
}
