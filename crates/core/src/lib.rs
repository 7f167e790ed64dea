//! Core business logic for Outlay.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the store traits each module defines.
//!
//! # Modules
//!
//! - `recurring` - Recurring expense schedules and the daily processing pass
//! - `budget` - Monthly budget and spend-vs-limit status

pub mod budget;
pub mod recurring;
