//! Shared types, errors, and configuration for Billsplit.
//!
//! This crate provides common types used across all other crates:
//! - Money types with exact minor-unit precision and a currency table
//! - Typed IDs for participants and items
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
