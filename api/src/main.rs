use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use mv_core::services::{Mailer, PasswordResetService, ResetServiceConfig};
use mv_infra::database::{DatabasePool, MySqlPasscodeStore, MySqlUserDirectory};
use mv_infra::mail::create_mailer;
use mv_shared::config::AppConfig;

use crate::routes::password_reset::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Mindverse API Server");

    // Load configuration
    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Wire up infrastructure
    let db_pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let passcode_store = Arc::new(MySqlPasscodeStore::new(db_pool.get_pool().clone()));
    let user_directory = Arc::new(MySqlUserDirectory::new(db_pool.get_pool().clone()));
    let mailer: Arc<dyn Mailer> = create_mailer(&config.mail).await;

    let reset_service = Arc::new(PasswordResetService::new(
        passcode_store,
        user_directory,
        Arc::new(mailer),
        ResetServiceConfig {
            resend_cooldown_seconds: config.passcode.resend_cooldown_seconds,
            code_expiration_minutes: config.passcode.code_expiration_minutes,
            max_attempts: config.passcode.max_attempts,
            hash_cost: config.passcode.hash_cost,
        },
    ));

    let app_state = web::Data::new(AppState {
        reset_service: reset_service.clone(),
    });

    HttpServer::new(move || app::create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
