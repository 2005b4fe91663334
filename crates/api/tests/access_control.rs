//! HTTP-level tests for token validation, role gates, and scope checks.
//!
//! Every test here exercises a rejection path that is decided before any
//! database query runs, so no live PostgreSQL is needed. Tokens are minted
//! locally with the shared test secret, standing in for the identity
//! provider.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, get, get_auth, mint_token, mint_token_with_exp, post_json, post_json_auth,
};
use teampulse_core::roles::{ROLE_ADMIN, ROLE_PLAYER, ROLE_STAFF};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Token validation
// ---------------------------------------------------------------------------

/// A protected route without any Authorization header returns 401.
#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/alerts").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

/// An Authorization header without the Bearer scheme returns 401.
#[tokio::test]
async fn non_bearer_authorization_returns_401() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/alerts")
        .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

/// A syntactically broken token returns 401.
#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app();
    let response = get_auth(app, "/api/v1/alerts", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

/// An expired token returns 401 even though the signature is valid.
#[tokio::test]
async fn expired_token_returns_401() {
    let app = common::build_test_app();
    // Expired well beyond the validator's 60-second leeway.
    let token = mint_token_with_exp(1, ROLE_STAFF, -300);
    let response = get_auth(app, "/api/v1/alerts", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Role gates
// ---------------------------------------------------------------------------

/// Admin tooling rejects non-admin roles with 403.
#[tokio::test]
async fn staff_cannot_reach_admin_routes() {
    let app = common::build_test_app();
    let token = mint_token(7, ROLE_STAFF);
    let response = get_auth(app, "/api/v1/admin/jobs/locks", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Admin role required");
}

/// Check-in submission is for players; staff get 403.
#[tokio::test]
async fn staff_cannot_submit_checkins() {
    let app = common::build_test_app();
    let token = mint_token(7, ROLE_STAFF);
    let body = serde_json::json!({ "mood": 4 });
    let response = post_json_auth(app, "/api/v1/checkins", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Player role required");
}

/// Admins have no alert feed of their own; the listing requires a
/// team or club scope.
#[tokio::test]
async fn admin_has_no_alert_listing_scope() {
    let app = common::build_test_app();
    let token = mint_token(1, ROLE_ADMIN);
    let response = get_auth(app, "/api/v1/alerts", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Only staff and club responsibles have an alert scope"
    );
}

// ---------------------------------------------------------------------------
// Scope checks
// ---------------------------------------------------------------------------

/// Players cannot read team staff feeds.
#[tokio::test]
async fn player_cannot_read_staff_updates() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let response = get_auth(app, "/api/v1/teams/7/staff-updates", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Team data is outside your scope");
}

/// Players cannot read club feeds.
#[tokio::test]
async fn player_cannot_read_club_updates() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let response = get_auth(app, "/api/v1/clubs/3/updates", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Club data is outside your scope");
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// A malformed week key is rejected before the summary lookup.
#[tokio::test]
async fn malformed_week_key_returns_400() {
    let app = common::build_test_app();
    let token = mint_token(1, ROLE_ADMIN);
    let response = get_auth(app, "/api/v1/teams/7/summaries/october", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "'october' is not a valid week key (expected weekly-YYYY-WW)"
    );
}

/// Ratings outside the 1-5 scale are rejected with the field name.
#[tokio::test]
async fn out_of_scale_rating_returns_400() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let body = serde_json::json!({ "mood": 0 });
    let response = post_json_auth(app, "/api/v1/checkins", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "mood must be between 1 and 5");
}

/// A check-in pinned to a date other than today is rejected.
#[tokio::test]
async fn stale_score_date_returns_400() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let body = serde_json::json!({ "mood": 4, "score_date": "2020-01-01" });
    let response = post_json_auth(app, "/api/v1/checkins", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap_or("");
    assert!(
        message.starts_with("score_date must be today"),
        "unexpected message: {message}"
    );
}

/// Users cannot register device tokens on someone else's account.
#[tokio::test]
async fn device_token_registration_is_self_only() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let body = serde_json::json!({ "token": "device-abc" });
    let response = post_json_auth(app, "/api/v1/users/99/device-tokens", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cannot register device tokens for another user");
}

/// A blank device token is rejected.
#[tokio::test]
async fn empty_device_token_returns_400() {
    let app = common::build_test_app();
    let token = mint_token(12, ROLE_PLAYER);
    let body = serde_json::json!({ "token": "   " });
    let response = post_json_auth(app, "/api/v1/users/12/device-tokens", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "token must not be empty");
}

// ---------------------------------------------------------------------------
// Environment gate
// ---------------------------------------------------------------------------

/// Destructive cleanup routes refuse to run in production, even for admins.
#[tokio::test]
async fn cleanup_routes_are_disabled_in_production() {
    let mut config = common::test_config();
    config.environment = "production".to_string();
    let app = common::build_test_app_with_config(config);

    let token = mint_token(1, ROLE_ADMIN);
    let response = post_json_auth(
        app,
        "/api/v1/admin/cleanup/alerts",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cleanup endpoints are disabled in production");
}

/// An unauthenticated POST is rejected before the body is considered.
#[tokio::test]
async fn checkin_without_token_returns_401() {
    let app = common::build_test_app();
    let body = serde_json::json!({ "mood": 4 });
    let response = post_json(app, "/api/v1/checkins", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
