use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use http::{Method, StatusCode, request::Parts};

use super::config::SOCIAL_LOGIN_REDIRECT_ANON;
use super::context::SessionUser;

pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    fn new(method: Method) -> Self {
        Self { method }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", SOCIAL_LOGIN_REDIRECT_ANON.as_str());
            Redirect::temporary(SOCIAL_LOGIN_REDIRECT_ANON.as_str()).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// The signed-in user, available as an Axum extractor
///
/// Requires the routes to be served by a router returned from
/// `SocialLogin::attach`, whose session layer resolves the session cookie.
/// Anonymous GET requests are redirected to `SOCIAL_LOGIN_REDIRECT_ANON`,
/// other methods get `401 Unauthorized`. Use `Option<AuthUser<U>>` for
/// pages open to both.
///
/// # Example
///
/// ```no_run
/// use social_login_axum::AuthUser;
///
/// #[derive(Clone)]
/// struct User {
///     name: String,
/// }
///
/// async fn protected_handler(AuthUser(user): AuthUser<User>) -> String {
///     format!("Hello, {}!", user.name)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser<U>(pub U);

impl<U, S> FromRequestParts<S> for AuthUser<U>
where
    U: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser<U>>()
            .and_then(|session| session.user.clone())
            .map(AuthUser)
            .ok_or_else(|| AuthRedirect::new(parts.method.clone()))
    }
}

impl<U, S> OptionalFromRequestParts<S> for AuthUser<U>
where
    U: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthUser<U> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
