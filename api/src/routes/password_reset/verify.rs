use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::password_reset::{VerifyResetRequest, VerifyResetResponse};
use crate::handlers::error::domain_error_response;
use crate::routes::password_reset::request::{validation_failure, AppState};

use mv_core::repositories::{PasscodeStore, UserDirectory};
use mv_core::services::Mailer;
use mv_shared::utils::email::mask_email;

/// Handler for POST /api/v1/password-reset/verify
///
/// Verifies a passcode and applies the new password.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "student@example.com",
///     "code": "042517",
///     "new_password": "a new password"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "ok": true,
///     "message": "Password updated"
/// }
/// ```
///
/// ## Errors
/// 400 invalid input or wrong/expired code, 404 unknown account,
/// 429 attempt limit reached, 500 update failure, 503 storage
/// unavailable.
pub async fn verify_reset<P, D, M>(
    state: web::Data<AppState<P, D, M>>,
    request: web::Json<VerifyResetRequest>,
) -> HttpResponse
where
    P: PasscodeStore + 'static,
    D: UserDirectory + 'static,
    M: Mailer + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    log::info!(
        "[{}] Processing password reset verification for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Some(response) = validation_failure(&request.0) {
        log::warn!("[{}] Validation failed for reset verification", request_id);
        return response;
    }

    match state
        .reset_service
        .verify_and_reset(&request.email, &request.code, &request.new_password)
        .await
    {
        Ok(()) => {
            log::info!(
                "[{}] Password reset completed for: {}",
                request_id,
                mask_email(&request.email)
            );

            HttpResponse::Ok().json(VerifyResetResponse {
                ok: true,
                message: "Password updated".to_string(),
            })
        }
        Err(error) => {
            log::warn!(
                "[{}] Password reset verification failed for: {}, error: {:?}",
                request_id,
                mask_email(&request.email),
                error
            );
            domain_error_response(&error)
        }
    }
}
