//! Configuration management
//!
//! Provides data models and a manager for loading/saving configuration
//! from the platform config directory.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{AppConfig, Preferences, ToolPaths};
