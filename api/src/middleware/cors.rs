//! CORS middleware configuration for cross-origin requests.
//!
//! The configuration is environment-aware: development allows any
//! origin for easier testing, production restricts origins to the
//! configured web domains.
//!
//! # Environment Variables
//! - `ENVIRONMENT`: Set to "production" for production settings
//! - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
//! - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Creates a CORS middleware instance configured for the current environment.
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .unwrap_or_else(|_| "3600".to_string())
        .parse::<usize>()
        .unwrap_or(3600);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

/// Permissive configuration for local development.
fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

/// Restrictive configuration for production.
///
/// Only origins named in `ALLOWED_ORIGINS` or derived from
/// `WEB_DOMAIN` are accepted.
fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age);

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if let Ok(web_domain) = env::var("WEB_DOMAIN") {
        cors = cors.allowed_origin(&format!("https://{}", web_domain));
        cors = cors.allowed_origin(&format!("https://www.{}", web_domain));
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_development_cors() {
        env::set_var("ENVIRONMENT", "development");
        let _cors = create_cors();
        env::remove_var("ENVIRONMENT");
    }

    #[test]
    fn test_create_production_cors() {
        env::set_var("ENVIRONMENT", "production");
        env::set_var("ALLOWED_ORIGINS", "https://app.mindverse.example");
        env::set_var("WEB_DOMAIN", "mindverse.example");

        let _cors = create_cors();

        env::remove_var("ENVIRONMENT");
        env::remove_var("ALLOWED_ORIGINS");
        env::remove_var("WEB_DOMAIN");
    }

    #[test]
    fn test_cors_max_age_parsing() {
        env::set_var("CORS_MAX_AGE", "7200");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");

        // Invalid max age falls back to the default
        env::set_var("CORS_MAX_AGE", "invalid");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");
    }
}
