//! Shared types, errors, and configuration for Tripsettle.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for participants and expenses
//! - Currency codes and the currency-precision lookup
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
