//! Shared types, errors, and configuration for Saldo.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for report plans, time slots and cost-location nodes
//! - Normalized cost-location codes
//! - In-memory input tables
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::ReportConfig;
pub use error::{AppError, AppResult};
