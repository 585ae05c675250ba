use http::{
    Method, StatusCode,
    header::{LOCATION, SET_COOKIE, WWW_AUTHENTICATE},
};
use serde_json::json;

use crate::common::test_app::{body_json, body_string};
use crate::common::{TestApp, session_cookie, test_config};

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
}

/// Complete a provider round trip and return the session cookie.
async fn sign_in(app: &TestApp, callback: &str, cookie: Option<&str>) -> String {
    let response = app.get(callback, cookie).await;
    assert_eq!(response.status(), StatusCode::OK, "callback {callback}");
    session_cookie(&response).expect("session cookie")
}

#[tokio::test]
async fn test_authentication_route_redirects_to_provider() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/auth/google", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://google.example/authorize?client_id=google-client\
         &redirect_uri=/auth/google/callback\
         &scope=https://www.googleapis.com/auth/plus.login&prompt=select_account"
    );
}

#[tokio::test]
async fn test_provider_default_scopes_reach_the_strategy() {
    let app = TestApp::new(test_config()).expect("attach");

    let amazon = app.get("/auth/amazon", None).await;
    assert_eq!(
        location(&amazon),
        "https://amazon.example/authorize?client_id=amazon-client\
         &redirect_uri=https://app.example/auth/amazon/callback&scope=profile"
    );

    let facebook = app.get("/auth/facebook", None).await;
    assert!(location(&facebook).ends_with("&scope="));
}

#[tokio::test]
async fn test_callback_signs_in_and_calls_application() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/auth/facebook/callback?code=alice", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with("__Host-SessionId="));
    assert_eq!(
        body_json(response).await,
        json!({
            "user": "facebook:alice",
            "authenticated": true,
            "info": { "first_login": true, "path": "/auth/facebook/callback" }
        })
    );
    assert_eq!(app.store.len().await, 1);

    let me = app.get("/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_string(me).await, "alice");
}

#[tokio::test]
async fn test_callback_success_redirect() {
    let app = TestApp::new(test_config()).expect("attach");

    // amazon's callbackUrl is absolute; the route is bound on its path
    let response = app
        .get("/auth/amazon/callback?code=bob&name=Bob", None)
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/me");
    let cookie = session_cookie(&response).expect("session cookie");

    let me = app.get("/me", Some(&cookie)).await;
    assert_eq!(body_string(me).await, "Bob");
}

#[tokio::test]
async fn test_callback_failure_redirect() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app
        .get("/auth/google/callback?error=access_denied", None)
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login-failed");
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(app.store.len().await, 0);
}

#[tokio::test]
async fn test_callback_failure_without_redirect_is_unauthorized() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app
        .get("/auth/facebook/callback?error=access_denied", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(WWW_AUTHENTICATE).expect("challenge"),
        "error=\"access_denied\""
    );
}

#[tokio::test]
async fn test_rejected_profile_is_unauthorized_without_challenge() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app
        .get("/auth/facebook/callback?code=banned-carol", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(!app.users.contains("facebook:banned-carol"));
}

#[tokio::test]
async fn test_rejection_info_reaches_application() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/auth/facebook?code=banned-dan", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "account suspended", "reason": "banned" })
    );
}

#[tokio::test]
async fn test_callback_without_session() {
    let mut config = test_config();
    config["social-login"]["strategies"]["facebook"]["callbackOptions"] =
        json!({ "session": false });
    let app = TestApp::new(config).expect("attach");

    let response = app.get("/auth/facebook/callback?code=judy", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["user"], json!("facebook:judy"));
    assert_eq!(body["authenticated"], json!(false));
    assert_eq!(app.store.len().await, 0);
}

#[tokio::test]
async fn test_strategy_error_on_callback_is_server_error() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/auth/google/callback?explode=1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_authentication_route_hands_settled_outcomes_to_application() {
    let app = TestApp::new(test_config()).expect("attach");

    let success = app.get("/auth/google?code=dave", None).await;
    assert_eq!(success.status(), StatusCode::OK);
    assert!(session_cookie(&success).is_some());
    assert_eq!(body_string(success).await, "signed in google:dave");

    let failure = app.get("/auth/google?error=denied", None).await;
    assert_eq!(failure.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(failure).await,
        json!({ "message": "error=\"denied\"", "status": null })
    );

    let error = app.get("/auth/google?explode=1", None).await;
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(error).await,
        "error: Strategy error: provider unavailable"
    );
}

#[tokio::test]
async fn test_anonymous_access_to_protected_routes() {
    let app = TestApp::new(test_config()).expect("attach");

    let me = app.get("/me", None).await;
    assert_eq!(me.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&me), "/");

    let profile = app.send(Method::POST, "/profile", None).await;
    assert_eq!(profile.status(), StatusCode::UNAUTHORIZED);

    let whoami = app.get("/whoami", None).await;
    assert_eq!(body_string(whoami).await, "anonymous");

    let unknown = app
        .get("/whoami", Some("__Host-SessionId=not-a-session"))
        .await;
    assert_eq!(body_string(unknown).await, "anonymous");
}

#[tokio::test]
async fn test_application_routes_are_kept() {
    let app = TestApp::new(test_config()).expect("attach");

    let home = app.get("/", None).await;
    assert_eq!(home.status(), StatusCode::OK);
    assert_eq!(body_string(home).await, "home");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new(test_config()).expect("attach");
    let cookie = sign_in(&app, "/auth/facebook/callback?code=erin", None).await;

    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let expired = response
        .headers()
        .get(SET_COOKIE)
        .expect("expiring cookie")
        .to_str()
        .expect("ascii cookie");
    assert!(expired.contains("Max-Age=-86400"));
    assert_eq!(app.store.len().await, 0);

    let me = app.get("/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/logout", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().get(SET_COOKIE).is_some());
}

#[tokio::test]
async fn test_second_login_replaces_session() {
    let app = TestApp::new(test_config()).expect("attach");
    let first = sign_in(&app, "/auth/facebook/callback?code=frank", None).await;
    let second = sign_in(&app, "/auth/facebook/callback?code=grace", Some(&first)).await;

    assert_ne!(first, second);
    assert_eq!(app.store.len().await, 1);

    let old = app.get("/whoami", Some(&first)).await;
    assert_eq!(body_string(old).await, "anonymous");
    let new = app.get("/whoami", Some(&second)).await;
    assert_eq!(body_string(new).await, "facebook:grace");
}

#[tokio::test]
async fn test_session_of_removed_user_is_dropped() {
    let app = TestApp::new(test_config()).expect("attach");
    let cookie = sign_in(&app, "/auth/facebook/callback?code=heidi", None).await;

    app.users.remove("facebook:heidi");

    let me = app.get("/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(app.store.len().await, 0);
}

#[tokio::test]
async fn test_callback_sees_existing_session() {
    let app = TestApp::new(test_config()).expect("attach");
    let cookie = sign_in(&app, "/auth/facebook/callback?code=ivan", None).await;

    // Signing in again while already signed in
    let response = app
        .get("/auth/facebook/callback?code=ivan", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["info"]["first_login"], json!(false));
}
