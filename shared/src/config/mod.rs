//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound email provider configuration
//! - `passcode` - One-time passcode issuance and verification policy
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod environment;
pub mod mail;
pub mod passcode;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use mail::MailConfig;
pub use passcode::PasscodeConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Passcode policy configuration
    pub passcode: PasscodeConfig,

    /// Mail provider configuration
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            passcode: PasscodeConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig::new("mysql://localhost:3306/mindverse_dev"),
            passcode: PasscodeConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/mindverse")
                .with_max_connections(50),
            passcode: PasscodeConfig::default(),
            mail: MailConfig::from_env(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            passcode: PasscodeConfig::from_env(),
            mail: MailConfig::from_env(),
            cors: if env.is_development() {
                CorsConfig::development()
            } else {
                CorsConfig::default()
            },
            logging: LoggingConfig::for_environment(env),
        }
    }
}
