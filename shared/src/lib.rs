//! Shared utilities and common types for the Mindverse server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Utility functions (email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, MailConfig, PasscodeConfig,
    ServerConfig, CorsConfig, LoggingConfig
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::email;
