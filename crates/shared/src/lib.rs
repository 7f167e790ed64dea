//! Shared types, errors, and configuration for Outlay.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with fixed two-digit decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, SchedulerConfig, ServerConfig};
pub use error::AppError;
