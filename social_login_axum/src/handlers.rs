use async_trait::async_trait;
use axum::response::Response;
use http::request::Parts;
use serde_json::{Value, json};
use std::sync::Arc;

use social_login::{AuthError, StrategyOutcome, UserSerializer, VerifyCallback};

use super::context::AuthContext;

/// What the authentication route produced, for the application to act on.
///
/// Exactly one of three shapes occurs: `error` set; `user` set on success;
/// neither set when the strategy failed, with `info` carrying what the
/// verify callback returned, or else the strategy's challenge.
#[derive(Debug)]
pub struct AuthenticateResult<U> {
    pub error: Option<AuthError>,
    pub user: Option<U>,
    pub info: Option<Value>,
}

impl<U> AuthenticateResult<U> {
    pub(crate) fn from_error(error: AuthError) -> Self {
        Self {
            error: Some(error),
            user: None,
            info: None,
        }
    }
}

impl<U> From<StrategyOutcome<U>> for AuthenticateResult<U> {
    fn from(outcome: StrategyOutcome<U>) -> Self {
        match outcome {
            StrategyOutcome::Success { user, info } => Self {
                error: None,
                user: Some(user),
                info,
            },
            StrategyOutcome::Fail {
                challenge,
                status,
                info,
            } => Self {
                error: None,
                user: None,
                info: info.or_else(|| {
                    (challenge.is_some() || status.is_some()).then(|| {
                        json!({
                            "message": challenge,
                            "status": status.map(|s| s.as_u16()),
                        })
                    })
                }),
            },
            StrategyOutcome::Error(e) => Self::from_error(e),
            // Redirects are answered by the route itself and never reach the application
            StrategyOutcome::Redirect { location } => Self {
                error: None,
                user: None,
                info: Some(json!({ "redirect": location })),
            },
        }
    }
}

/// Application callbacks bound to the login routes.
#[async_trait]
pub trait RouteHandlers<U>: Send + Sync {
    /// Runs on the authentication route once the strategy settled without
    /// redirecting.
    async fn on_authenticate(
        &self,
        result: AuthenticateResult<U>,
        ctx: AuthContext<U>,
        parts: Parts,
    ) -> Response;

    /// Runs on the callback route after a successful login. Session cookies
    /// are added to the returned response.
    async fn on_callback(&self, user: U, ctx: AuthContext<U>, parts: Parts) -> Response;

    async fn on_logout(&self, ctx: AuthContext<U>, parts: Parts) -> Response;
}

/// The application-supplied function bundle.
pub struct AuthFunctions<U> {
    pub verify: Arc<dyn VerifyCallback<U>>,
    pub serializer: Arc<dyn UserSerializer<U>>,
    pub routes: Arc<dyn RouteHandlers<U>>,
}

impl<U> Clone for AuthFunctions<U> {
    fn clone(&self) -> Self {
        Self {
            verify: self.verify.clone(),
            serializer: self.serializer.clone(),
            routes: self.routes.clone(),
        }
    }
}
