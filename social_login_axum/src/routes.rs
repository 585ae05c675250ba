//! Handlers behind the per-provider routes and the logout route

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use http::{
    HeaderMap, HeaderValue, StatusCode,
    header::{LOCATION, WWW_AUTHENTICATE},
};
use std::sync::Arc;

use social_login::{AuthRequest, SocialLoginError, StrategyDescriptor, StrategyOutcome};

use super::context::{AuthContext, AuthInfo, LoginState};
use super::error::IntoResponseError;
use super::handlers::AuthenticateResult;

/// First leg: send the browser to the provider, or let the application
/// decide when the strategy settles right away.
pub(crate) async fn authentication_route<U>(
    state: Arc<LoginState<U>>,
    descriptor: Arc<StrategyDescriptor>,
    req: Request,
) -> Response
where
    U: Clone + Send + Sync + 'static,
{
    let (parts, _body) = req.into_parts();
    let auth_req = AuthRequest::new(parts.method.clone(), &parts.uri, parts.headers.clone());

    let outcome = state
        .authenticator
        .authenticate(
            &descriptor.name,
            &auth_req,
            &descriptor.authentication_options,
        )
        .await;

    let result = match outcome {
        Ok(StrategyOutcome::Redirect { location }) => return found(&location),
        Ok(outcome) => AuthenticateResult::from(outcome),
        Err(e) => AuthenticateResult::from_error(e),
    };

    tracing::debug!(
        "Strategy \"{}\" settled on the authentication route",
        descriptor.name
    );
    let ctx = AuthContext::from_parts(&parts, state.clone());
    state.routes.on_authenticate(result, ctx, parts).await
}

/// Second leg: the provider sent the browser back.
pub(crate) async fn callback_route<U>(
    state: Arc<LoginState<U>>,
    descriptor: Arc<StrategyDescriptor>,
    req: Request,
) -> Response
where
    U: Clone + Send + Sync + 'static,
{
    let (mut parts, _body) = req.into_parts();
    let auth_req = AuthRequest::new(parts.method.clone(), &parts.uri, parts.headers.clone());
    let options = &descriptor.callback_options;

    let outcome = state
        .authenticator
        .authenticate(&descriptor.name, &auth_req, options)
        .await
        .map_err(SocialLoginError::from);

    let outcome = match outcome.into_response_error() {
        Ok(outcome) => outcome,
        Err(rejection) => return rejection.into_response(),
    };

    match outcome {
        StrategyOutcome::Redirect { location } => found(&location),
        StrategyOutcome::Success { user, info } => {
            let mut ctx = AuthContext::from_parts(&parts, state.clone());
            let cookie_headers = if options.session {
                match ctx.login(&user).await.into_response_error() {
                    Ok(headers) => headers,
                    Err(rejection) => return rejection.into_response(),
                }
            } else {
                HeaderMap::new()
            };
            tracing::debug!("Strategy \"{}\" authenticated a user", descriptor.name);

            if let Some(url) = options.success_redirect.as_deref() {
                return (cookie_headers, found(url)).into_response();
            }

            if let Some(info) = info {
                parts.extensions.insert(AuthInfo(info));
            }
            let mut response = state.routes.on_callback(user, ctx, parts).await;
            for (name, value) in cookie_headers.iter() {
                response.headers_mut().append(name, value.clone());
            }
            response
        }
        StrategyOutcome::Fail {
            challenge,
            status,
            info,
        } => {
            tracing::debug!(
                "Strategy \"{}\" failed: {:?} {:?}",
                descriptor.name,
                challenge.as_deref(),
                info
            );
            if let Some(url) = options.failure_redirect.as_deref() {
                return found(url);
            }
            unauthorized(status, challenge.as_deref())
        }
        StrategyOutcome::Error(e) => Err::<Response, _>(SocialLoginError::from(e))
            .into_response_error()
            .into_response(),
    }
}

pub(crate) async fn logout_route<U>(state: Arc<LoginState<U>>, req: Request) -> Response
where
    U: Clone + Send + Sync + 'static,
{
    let (parts, _body) = req.into_parts();
    let ctx = AuthContext::from_parts(&parts, state.clone());
    state.routes.on_logout(ctx, parts).await
}

fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!("Refusing to redirect to an invalid location");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect location").into_response()
        }
    }
}

fn unauthorized(status: Option<StatusCode>, challenge: Option<&str>) -> Response {
    let builder = Response::builder().status(status.unwrap_or(StatusCode::UNAUTHORIZED));
    let builder = match challenge {
        Some(challenge) => builder.header(WWW_AUTHENTICATE, challenge),
        None => builder,
    };
    builder
        .body(axum::body::Body::from("Unauthorized"))
        .into_response_error()
        .into_response()
}
