use axum::Router;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

use social_login_axum::{
    AuthError, ConfigError, Provider, SocialLogin, SocialLoginError, StrategyModules,
};

use crate::common::test_app::{all_modules, body_string, functions};
use crate::common::{ScriptedFactory, TestApp, TestUser, UserTable, test_config};

fn google_only(logout_url: &str, authentication_url: &str) -> serde_json::Value {
    json!({
        "social-login": {
            "logoutUrl": logout_url,
            "strategies": {
                "google": {
                    "clientId": "google-client",
                    "clientSecret": "google-secret",
                    "authenticationUrl": authentication_url,
                    "callbackUrl": "/auth/google/callback"
                }
            }
        }
    })
}

#[tokio::test]
async fn test_unknown_providers_are_not_routed() {
    let app = TestApp::new(test_config()).expect("attach");

    let response = app.get("/auth/github", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_configured_providers_are_routed() {
    let app = TestApp::new(google_only("/logout", "/auth/google")).expect("attach");

    assert_eq!(
        app.get("/auth/google", None).await.status(),
        StatusCode::FOUND
    );
    assert_eq!(
        app.get("/auth/amazon", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_empty_strategies_binds_only_logout() {
    let config = json!({
        "social-login": { "logoutUrl": "/signout", "strategies": {} }
    });
    let app = TestApp::new(config).expect("attach");

    assert_eq!(
        app.get("/signout", None).await.status(),
        StatusCode::SEE_OTHER
    );
    assert_eq!(
        app.get("/logout", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_missing_logout_url() {
    let mut config = google_only("/logout", "/auth/google");
    config["social-login"]
        .as_object_mut()
        .expect("section")
        .remove("logoutUrl");

    let err = TestApp::new(config).err().expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::Config(ConfigError::MissingKey(ref path)) if path == "social-login.logoutUrl"
    ));
}

#[test]
fn test_missing_client_secret_names_full_path() {
    let mut config = google_only("/logout", "/auth/google");
    config["social-login"]["strategies"]["google"]
        .as_object_mut()
        .expect("google")
        .remove("clientSecret");

    let err = TestApp::new(config).err().expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::Config(ConfigError::MissingKey(ref path))
            if path == "social-login.strategies.google.clientSecret"
    ));
}

#[test]
fn test_missing_strategies_section() {
    let config = json!({ "social-login": { "logoutUrl": "/logout" } });

    let err = TestApp::new(config).err().expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::Config(ConfigError::MissingKey(ref path))
            if path == "social-login.strategies"
    ));
}

#[test]
fn test_missing_strategy_module() {
    let modules = StrategyModules::new()
        .with(Provider::Amazon, Arc::new(ScriptedFactory::new(Provider::Amazon)))
        .with(Provider::Google, Arc::new(ScriptedFactory::new(Provider::Google)));

    let err = TestApp::with_modules(test_config(), modules)
        .err()
        .expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::Auth(AuthError::MissingStrategyModule(ref name)) if name == "facebook"
    ));
}

#[test]
fn test_strategy_registering_under_wrong_name() {
    let modules = StrategyModules::new().with(
        Provider::Google,
        Arc::new(ScriptedFactory::misnamed(Provider::Google, "google-oauth20")),
    );

    let err = TestApp::with_modules(google_only("/logout", "/auth/google"), modules)
        .err()
        .expect("attach should fail");
    assert_eq!(
        err.to_string(),
        "Authentication error: Strategy for \"google\" registered itself as \"google-oauth20\""
    );
}

#[test]
fn test_logout_url_colliding_with_provider_route() {
    let err = TestApp::new(google_only("/auth/google", "/auth/google"))
        .err()
        .expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::InvalidRoute { ref path, .. } if path == "/auth/google"
    ));
}

#[test]
fn test_relative_authentication_url() {
    let err = TestApp::new(google_only("/logout", "auth/google"))
        .err()
        .expect("attach should fail");
    assert!(matches!(
        err,
        SocialLoginError::InvalidRoute { ref path, .. } if path == "auth/google"
    ));
}

#[test]
fn test_parameterized_authentication_url() {
    let err = TestApp::new(google_only("/logout", "/auth/{provider}"))
        .err()
        .expect("attach should fail");
    assert!(matches!(err, SocialLoginError::InvalidRoute { .. }));
}

#[tokio::test]
#[serial]
async fn test_attach_with_defaults_merges_module_defaults() {
    let inline = json!({
        "social-login": {
            "logoutUrl": "/bye",
            "strategies": { "google": { "clientSecret": "from-environment" } }
        }
    });
    let original = std::env::var("SOCIAL_LOGIN_CONFIG").ok();
    unsafe { std::env::set_var("SOCIAL_LOGIN_CONFIG", inline.to_string()) };

    let defaults = json!({
        "logoutUrl": "/logout",
        "strategies": {
            "google": {
                "clientId": "default-client",
                "clientSecret": "default-secret",
                "authenticationUrl": "/auth/google",
                "callbackUrl": "/auth/google/callback"
            }
        }
    });
    let users = Arc::new(UserTable::default());
    let result = SocialLogin::<TestUser>::new(functions(users), all_modules())
        .attach_with_defaults(Router::new(), defaults);

    match original {
        Some(value) => unsafe { std::env::set_var("SOCIAL_LOGIN_CONFIG", value) },
        None => unsafe { std::env::remove_var("SOCIAL_LOGIN_CONFIG") },
    }

    let router = result.expect("attach");
    let app = TestApp::from_router(router);

    // The document's logoutUrl wins over the default
    assert_eq!(
        app.get("/bye", None).await.status(),
        StatusCode::SEE_OTHER
    );
    assert_eq!(
        app.get("/logout", None).await.status(),
        StatusCode::NOT_FOUND
    );

    let redirect = app.get("/auth/google", None).await;
    assert_eq!(redirect.status(), StatusCode::FOUND);
    let location = redirect
        .headers()
        .get(http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location");
    assert!(location.starts_with("https://google.example/authorize?client_id=default-client&"));
    assert!(body_string(redirect).await.is_empty());
}
