//! Integration tests for registration, login, refresh-token rotation,
//! logout and password change over HTTP

#[macro_use]
mod common;

use actix_web::{cookie::Cookie, dev::ServiceResponse, http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, context, login_request, register_request, PASSWORD};
use vt_core::repositories::SessionRegistry;

fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

#[actix_web::test]
async fn test_register_returns_created_envelope() {
    let ctx = context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, register_request("alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["avatarUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://media.test/"));
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("refreshToken").is_none());
}

#[actix_web::test]
async fn test_register_validation_and_conflict() {
    let ctx = context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(json!({ "username": "alice" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .contains(&json!("password: is required")));

    test::call_service(&app, register_request("alice").to_request()).await;
    let resp = test::call_service(&app, register_request("alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User with email or username already exists");
}

#[actix_web::test]
async fn test_register_upload_failure_is_generic_500() {
    let ctx = context();
    let app = init_app!(ctx);
    ctx.media.set_failing(true);

    let resp = test::call_service(&app, register_request("alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Something went wrong");
    assert_eq!(ctx.store.account_count().await, 0);
}

#[actix_web::test]
async fn test_login_sets_session_cookies() {
    let ctx = context();
    let app = init_app!(ctx);
    test::call_service(&app, register_request("alice").to_request()).await;

    let resp = test::call_service(&app, login_request("alice", PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let access = cookie_value(&resp, "accessToken").unwrap();
    let refresh = cookie_value(&resp, "refreshToken").unwrap();
    for cookie in [&access, &refresh] {
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User logged in successfully");
    assert_eq!(body["data"]["accessToken"], access.value());
    assert_eq!(body["data"]["refreshToken"], refresh.value());
    assert_eq!(body["data"]["user"]["username"], "alice");
}

#[actix_web::test]
async fn test_login_failures() {
    let ctx = context();
    let app = init_app!(ctx);

    let unknown = test::call_service(&app, login_request("ghost", PASSWORD).to_request()).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    test::call_service(&app, register_request("alice").to_request()).await;
    let wrong = test::call_service(&app, login_request("alice", "nope").to_request()).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(wrong).await;
    assert_eq!(body["message"], "Invalid user credentials");
}

#[actix_web::test]
async fn test_refresh_rotates_and_rejects_replay() {
    let ctx = context();
    let app = init_app!(ctx);
    test::call_service(&app, register_request("alice").to_request()).await;
    let login = test::call_service(&app, login_request("alice", PASSWORD).to_request()).await;
    let first = cookie_value(&login, "refreshToken").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .cookie(first.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second = cookie_value(&resp, "refreshToken").unwrap();
    assert_ne!(second.value(), first.value());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["refreshToken"], second.value());

    let replay = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .cookie(first)
            .to_request(),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(replay).await;
    assert_eq!(body["message"], "Refresh token is expired or used");

    // Body fallback for clients without cookies
    let via_body = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .set_json(json!({ "refreshToken": second.value() }))
            .to_request(),
    )
    .await;
    assert_eq!(via_body.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_without_token_is_unauthorized() {
    let ctx = context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized request");
}

#[actix_web::test]
async fn test_logout_clears_session_and_is_idempotent() {
    let ctx = context();
    let app = init_app!(ctx);
    test::call_service(&app, register_request("alice").to_request()).await;
    let login = test::call_service(&app, login_request("alice", PASSWORD).to_request()).await;
    let access = cookie_value(&login, "accessToken").unwrap();
    let refresh = cookie_value(&login, "refreshToken").unwrap();
    let body: Value = test::read_body_json(login).await;
    let account_id = body["data"]["user"]["id"].as_str().unwrap().parse().unwrap();

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users/logout")
                .cookie(access.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = cookie_value(&resp, "refreshToken").unwrap();
        assert_eq!(cleared.value(), "");
        assert_eq!(
            cleared.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
    }

    assert_eq!(ctx.store.get(account_id).await.unwrap(), None);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .cookie(refresh)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_change_password_keeps_session() {
    let ctx = context();
    let app = init_app!(ctx);
    test::call_service(&app, register_request("alice").to_request()).await;
    let login = test::call_service(&app, login_request("alice", PASSWORD).to_request()).await;
    let refresh = cookie_value(&login, "refreshToken").unwrap();
    let body: Value = test::read_body_json(login).await;
    let access = body["data"]["accessToken"].as_str().unwrap().to_string();

    let wrong_old = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/change-password")
            .insert_header(bearer(&access))
            .set_json(json!({ "oldPassword": "nope", "newPassword": "n3w-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(wrong_old.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/change-password")
            .insert_header(bearer(&access))
            .set_json(json!({ "oldPassword": PASSWORD, "newPassword": "n3w-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let old = test::call_service(&app, login_request("alice", PASSWORD).to_request()).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let refreshed = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/refresh-token")
            .cookie(refresh)
            .to_request(),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);
}
