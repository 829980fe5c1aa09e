//! Configuration module for kassebog
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - The category rule table

pub mod paths;
pub mod rules;
pub mod settings;

pub use paths::KassebogPaths;
pub use rules::{CategoryRule, CategoryRuleSet};
pub use settings::Settings;
