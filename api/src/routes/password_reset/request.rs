use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::password_reset::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::error::domain_error_response;

use mv_core::repositories::{PasscodeStore, UserDirectory};
use mv_core::services::{Mailer, PasswordResetService};
use mv_shared::types::response::ErrorResponse;
use mv_shared::utils::email::mask_email;

/// Application state that holds shared services
pub struct AppState<P, D, M>
where
    P: PasscodeStore,
    D: UserDirectory,
    M: Mailer,
{
    pub reset_service: Arc<PasswordResetService<P, D, M>>,
}

/// Handler for POST /api/v1/password-reset/request
///
/// Issues a passcode and emails it to the account holder.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "student@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "ok": true,
///     "message": "Reset code sent. Please check your email.",
///     "resend_after": 30
/// }
/// ```
///
/// ## Errors
/// 400 invalid email, 429 resend cooldown active, 500 delivery
/// failure, 503 storage unavailable.
pub async fn request_code<P, D, M>(
    state: web::Data<AppState<P, D, M>>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse
where
    P: PasscodeStore + 'static,
    D: UserDirectory + 'static,
    M: Mailer + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    log::info!(
        "[{}] Processing password reset request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Some(response) = validation_failure(&request.0) {
        log::warn!("[{}] Validation failed for reset request", request_id);
        return response;
    }

    match state.reset_service.request_code(&request.email).await {
        Ok(result) => {
            let now = chrono::Utc::now();
            let resend_after = result
                .next_resend_at
                .signed_duration_since(now)
                .num_seconds()
                .max(0);

            log::info!(
                "[{}] Reset code sent to: {}, message_id: {}",
                request_id,
                mask_email(&request.email),
                result.message_id
            );

            HttpResponse::Ok().json(RequestCodeResponse {
                ok: true,
                message: "Reset code sent. Please check your email.".to_string(),
                resend_after,
            })
        }
        Err(error) => {
            log::warn!(
                "[{}] Failed to send reset code to: {}, error: {:?}",
                request_id,
                mask_email(&request.email),
                error
            );
            domain_error_response(&error)
        }
    }
}

/// Build a 400 response from validator failures, if any
pub(super) fn validation_failure<T: Validate>(request: &T) -> Option<HttpResponse> {
    let validation_errors = request.validate().err()?;

    let mut field_errors = HashMap::new();
    for (field, errors) in validation_errors.field_errors() {
        let messages: Vec<serde_json::Value> = errors
            .iter()
            .map(|e| {
                serde_json::json!(e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()))
            })
            .collect();
        field_errors.insert(field.to_string(), serde_json::json!(messages));
    }

    Some(
        HttpResponse::BadRequest().json(
            ErrorResponse::new(
                "invalid_input".to_string(),
                "Invalid request data".to_string(),
            )
            .with_details(field_errors),
        ),
    )
}
