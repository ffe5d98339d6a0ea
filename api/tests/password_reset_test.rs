//! Integration tests for the password reset endpoints

use actix_web::{test, web};
use std::sync::Arc;

use mv_api::app::create_app;
use mv_api::routes::password_reset::AppState;
use mv_core::repositories::{MockPasscodeStore, MockUserDirectory};
use mv_core::services::{PasswordResetService, ResetServiceConfig};
use mv_infra::mail::MockMailService;

const EMAIL: &str = "student@example.com";

type TestState = AppState<MockPasscodeStore, MockUserDirectory, MockMailService>;

struct TestContext {
    state: web::Data<TestState>,
    store: Arc<MockPasscodeStore>,
    directory: Arc<MockUserDirectory>,
    mailer: Arc<MockMailService>,
}

fn build_context(cooldown_seconds: i64) -> TestContext {
    let store = Arc::new(MockPasscodeStore::new());
    let directory = Arc::new(MockUserDirectory::new());
    let mailer = Arc::new(MockMailService::with_options(false, false));

    let service = PasswordResetService::new(
        store.clone(),
        directory.clone(),
        mailer.clone(),
        ResetServiceConfig {
            resend_cooldown_seconds: cooldown_seconds,
            code_expiration_minutes: 10,
            max_attempts: 5,
            hash_cost: 4,
        },
    );

    TestContext {
        state: web::Data::new(AppState {
            reset_service: Arc::new(service),
        }),
        store,
        directory,
        mailer,
    }
}

#[actix_rt::test]
async fn test_request_and_verify_happy_path() {
    let ctx = build_context(30);
    let account = ctx.directory.add_account(EMAIL).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert!(body["resend_after"].as_i64().unwrap() > 0);

    let code = ctx.mailer.get_sent_code(EMAIL).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(serde_json::json!({
            "email": EMAIL,
            "code": code,
            "new_password": "brand new password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "Password updated");

    let hash = ctx.directory.password_hash(account.id).await.unwrap();
    assert!(bcrypt::verify("brand new password", &hash).unwrap());
}

#[actix_rt::test]
async fn test_resend_within_cooldown_returns_429() {
    let ctx = build_context(30);
    ctx.directory.add_account(EMAIL).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "throttled");
    let cooldown = body["details"]["cooldown"].as_i64().unwrap();
    assert!(cooldown > 0 && cooldown <= 30);

    assert_eq!(ctx.mailer.get_message_count(), 1);
}

#[actix_rt::test]
async fn test_wrong_code_reports_remaining_attempts() {
    let ctx = build_context(30);
    ctx.directory.add_account(EMAIL).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;

    let sent = ctx.mailer.get_sent_code(EMAIL).await.unwrap();
    let wrong = if sent == "000000" { "000001" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(serde_json::json!({
            "email": EMAIL,
            "code": wrong,
            "new_password": "brand new password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_incorrect");
    assert_eq!(body["details"]["remaining_attempts"], 4);
}

#[actix_rt::test]
async fn test_code_cannot_be_reused() {
    let ctx = build_context(30);
    ctx.directory.add_account(EMAIL).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;

    let code = ctx.mailer.get_sent_code(EMAIL).await.unwrap();
    let verify_body = serde_json::json!({
        "email": EMAIL,
        "code": code,
        "new_password": "brand new password"
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(verify_body.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(verify_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_invalid");
}

#[actix_rt::test]
async fn test_short_password_is_rejected_before_lookup() {
    let ctx = build_context(30);
    ctx.directory.add_account(EMAIL).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(serde_json::json!({
            "email": EMAIL,
            "code": "123456",
            "new_password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(ctx.directory.update_call_count(), 0);
    assert_eq!(ctx.store.record_count().await, 0);
}

#[actix_rt::test]
async fn test_invalid_email_is_rejected() {
    let ctx = build_context(30);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    assert_eq!(ctx.store.record_count().await, 0);
}

#[actix_rt::test]
async fn test_unknown_account_returns_404() {
    let ctx = build_context(30);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    // Code is issued without checking the directory, so the miss only
    // surfaces at verification time
    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/request")
        .set_json(serde_json::json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let code = ctx.mailer.get_sent_code(EMAIL).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/password-reset/verify")
        .set_json(serde_json::json!({
            "email": EMAIL,
            "code": code,
            "new_password": "brand new password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");
}

#[actix_rt::test]
async fn test_health_check() {
    let ctx = build_context(30);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mindverse-api");
}

#[actix_rt::test]
async fn test_unknown_route_returns_json_404() {
    let ctx = build_context(30);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
