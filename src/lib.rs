//! spendcast - budget cycles and month-end spend forecasting
//!
//! Records income and expenses, tracks budget periods with per-category
//! allocations, and answers two questions: how much of the current budget
//! cycle is left, and where will this month's spending end up.
//!
//! # Architecture
//!
//! - `models`: transactions, budget periods, subscriptions and the derived
//!   status and forecast reports
//! - `services`: the cycle resolver, spend aggregator, status calculator and
//!   forecast projector, plus the services that feed them from storage
//! - `storage`: JSON file repositories with atomic writes
//! - `audit`: append-only log of every change
//! - `config`: data paths and user settings
//! - `cli` / `display`: the command-line surface
//!
//! # Example
//!
//! ```rust,ignore
//! use spendcast::config::{paths::SpendcastPaths, settings::Settings};
//! use spendcast::services::ForecastService;
//! use spendcast::storage::Storage;
//!
//! let paths = SpendcastPaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let forecast = ForecastService::new(&storage).expense_forecast(None)?;
//! println!("projected: {}", forecast.projected_month_total);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SpendcastError, SpendcastResult};
