//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository pattern implementations

pub mod connection;
pub mod repositories;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use repositories::{MySqlPasscodeStore, MySqlUserDirectory};
