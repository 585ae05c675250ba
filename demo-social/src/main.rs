use axum::{Router, routing::get};
use dotenvy::dotenv;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use social_login_axum::{AuthFunctions, SocialLogin};

mod dev_strategy;
mod handlers;
mod server;
mod users;

use crate::{
    dev_strategy::dev_modules,
    handlers::{DemoRoutes, index, protected},
    server::spawn_http_server,
    users::DemoUsers,
};

const PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,social_login=debug,social_login_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let users = Arc::new(DemoUsers::default());
    let functions = AuthFunctions {
        verify: users.clone(),
        serializer: users,
        routes: Arc::new(DemoRoutes),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/protected", get(protected));

    // Used for anything config/default.json or SOCIAL_LOGIN_CONFIG leave out
    let defaults = json!({
        "logoutUrl": "/logout",
        "strategies": {
            "amazon": {
                "clientId": "demo-amazon-client",
                "clientSecret": "demo-amazon-secret",
                "authenticationUrl": "/auth/amazon",
                "callbackUrl": "/auth/amazon/callback"
            },
            "facebook": {
                "clientId": "demo-facebook-client",
                "clientSecret": "demo-facebook-secret",
                "authenticationUrl": "/auth/facebook",
                "callbackUrl": "/auth/facebook/callback"
            },
            "google": {
                "clientId": "demo-google-client",
                "clientSecret": "demo-google-secret",
                "authenticationUrl": "/auth/google",
                "callbackUrl": "/auth/google/callback",
                "authenticationOptions": { "prompt": "select_account" },
                "callbackOptions": { "failureRedirect": "/" }
            }
        }
    });

    let app = SocialLogin::new(functions, dev_modules()).attach_with_defaults(app, defaults)?;

    spawn_http_server(PORT, app).await?;
    Ok(())
}
