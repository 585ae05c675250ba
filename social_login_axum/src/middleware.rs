use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use social_login::{SocialLoginError, session_id_from_headers, session_key};

use super::context::{LoginState, SessionUser};

/// Resolve the session cookie to a user and expose it to the handlers.
///
/// Runs for every request of the application the login routes are attached
/// to. A session whose user can no longer be deserialized is dropped and the
/// request continues anonymously.
pub(crate) async fn session_layer<U>(
    State(state): State<Arc<LoginState<U>>>,
    mut req: Request,
    next: Next,
) -> Response
where
    U: Clone + Send + Sync + 'static,
{
    let session_id = session_id_from_headers(req.headers());

    let user = match session_id.as_deref() {
        Some(id) => match resolve_user(&state, id).await {
            Ok(user) => user,
            Err(e) => {
                let e = e.log();
                return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
            }
        },
        None => None,
    };

    req.extensions_mut().insert(SessionUser {
        user,
        session_id,
    });
    next.run(req).await
}

async fn resolve_user<U>(
    state: &LoginState<U>,
    session_id: &str,
) -> Result<Option<U>, SocialLoginError>
where
    U: Clone + Send + Sync + 'static,
{
    let Some(key) = session_key(state.store.as_ref(), session_id).await? else {
        tracing::debug!("Session cookie does not match a live session");
        return Ok(None);
    };

    let user = state.authenticator.deserialize_user(&key).await?;
    if user.is_none() {
        tracing::debug!("Session user no longer exists, dropping session");
        state.store.remove(session_id).await?;
    }
    Ok(user)
}
