//! Kassebog - transaction normalization and carry-over budget accounting
//!
//! This library turns a bank's CSV transaction export into normalized,
//! categorized, single-currency records and reconciles monthly and weekly
//! spending against a configurable, carry-over-aware budget. Nothing is
//! persisted: every run recomputes from the export, so the source file is
//! the only state.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution, user settings, and the category rule table
//! - `error`: Custom error types
//! - `models`: Core data models (money, month keys, transactions)
//! - `ingest`: CSV reading and column detection
//! - `services`: The pipeline, aggregation, and budget ledger
//! - `reports`: Terminal and CSV rendering of the derived figures
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use kassebog::config::{CategoryRuleSet, KassebogPaths, Settings};
//! use kassebog::services::Pipeline;
//!
//! let paths = KassebogPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let rules = CategoryRuleSet::load_or_builtin(&paths)?;
//! let result = Pipeline::new(&settings, &rules).load_file(&settings.csv_path)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{KassebogError, KassebogResult};
