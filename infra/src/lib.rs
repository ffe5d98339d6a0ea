//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Mindverse
//! password reset service, following Clean Architecture principles. It
//! provides concrete implementations for database access and outbound
//! email delivery.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx
//! - **Mail**: Email provider integrations (AWS SES, mock)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `aws-ses`: Enable AWS SES mail delivery (default)
//! - `mock-services`: Enable mock implementations for testing

// Re-export core types for convenience
pub use mv_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail service module - Email providers
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
