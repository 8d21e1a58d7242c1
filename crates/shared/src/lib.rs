//! Shared types and configuration for Kassa.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
