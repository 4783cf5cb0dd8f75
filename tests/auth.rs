mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{create_user, pool, session_cookie, signin_request, test_app};

#[actix_web::test]
async fn signup_with_sign_in_opens_a_session() {
    let pool = pool();
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "username": "carol", "password": "secret", "sign_in": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get()
        .uri("/api/auth/user")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "carol");
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn duplicate_username_is_unprocessable() {
    let pool = pool();
    create_user(&pool, "alice");
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "username": "alice", "password": "other" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username alice already exists.");
}

#[actix_web::test]
async fn signin_checks_password_and_username() {
    let pool = pool();
    let user = create_user(&pool, "alice");
    let app = test_app!(pool);

    let resp = test::call_service(&app, signin_request("alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user.id.as_str());

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({ "username": "alice", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, signin_request("nobody").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn current_user_requires_signin() {
    let pool = pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/auth/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Signin required.");
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let pool = pool();
    create_user(&pool, "alice");
    let app = test_app!(pool);

    let cookie = session_cookie(&test::call_service(&app, signin_request("alice").to_request()).await);

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn user_lookup_by_id() {
    let pool = pool();
    let user = create_user(&pool, "alice");
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["last_message"], Value::Null);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
