//! fintrack - personal finance tracker
//!
//! This library provides the core functionality for the fintrack
//! application: income and expense transactions organized into categories,
//! monthly budgets per category, savings goals, and the derived metrics a
//! dashboard shows for them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `analytics`: Pure aggregation and filtering over loaded records
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, goals)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Dashboard, budget and trend reports
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::analytics::{compute_totals, TransactionFilter};
//! use fintrack::config::FintrackPaths;
//! use fintrack::storage::{initialize_storage, Storage};
//!
//! let paths = FintrackPaths::new()?;
//! let settings = initialize_storage(&paths)?;
//! let mut storage = Storage::new(paths, settings.user_id)?;
//! storage.load_all()?;
//!
//! let transactions = storage.transactions.get_all(settings.user_id)?;
//! let groceries = TransactionFilter::new().search("groceries").apply(&transactions);
//! let totals = compute_totals(&groceries)?;
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
