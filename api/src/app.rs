//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::cors::create_cors;
use crate::routes::password_reset::{
    request::request_code, verify::verify_reset, AppState,
};

use mv_core::repositories::{PasscodeStore, UserDirectory};
use mv_core::services::Mailer;

/// Create and configure the application with all dependencies
pub fn create_app<P, D, M>(
    app_state: web::Data<AppState<P, D, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PasscodeStore + 'static,
    D: UserDirectory + 'static,
    M: Mailer + 'static,
{
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: CORS first, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/password-reset")
                        .route("/request", web::post().to(request_code::<P, D, M>))
                        .route("/verify", web::post().to(verify_reset::<P, D, M>)),
                )
                // API documentation endpoint
                .route("/", web::get().to(api_documentation)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mindverse-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Mindverse API v1",
        "endpoints": {
            "health": "/health",
            "password_reset": {
                "request": {
                    "path": "/api/v1/password-reset/request",
                    "method": "POST",
                    "description": "Send a password reset code by email",
                    "request_body": {
                        "email": "string (valid email address)"
                    },
                    "responses": {
                        "200": "Reset code sent",
                        "400": "Invalid email format",
                        "429": "Resend cooldown active",
                        "500": "Email delivery failed",
                        "503": "Storage unavailable"
                    }
                },
                "verify": {
                    "path": "/api/v1/password-reset/verify",
                    "method": "POST",
                    "description": "Verify a reset code and set a new password",
                    "request_body": {
                        "email": "string (valid email address)",
                        "code": "string (exactly 6 digits)",
                        "new_password": "string (at least 8 chars)"
                    },
                    "responses": {
                        "200": "Password updated",
                        "400": "Invalid input, wrong or expired code",
                        "404": "No account for email",
                        "429": "Attempt limit reached",
                        "500": "Password update failed",
                        "503": "Storage unavailable"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
