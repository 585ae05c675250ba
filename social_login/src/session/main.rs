use chrono::{Duration, Utc};
use headers::HeaderMapExt;
use http::header::HeaderMap;

use crate::utils::{gen_random_string, header_set_cookie};

use super::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use super::errors::SessionError;
use super::store::{SessionStore, StoredSession};

/// Session id carried by the request's session cookie, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<headers::Cookie>()
        .and_then(|cookies| cookies.get(SESSION_COOKIE_NAME.as_str()).map(str::to_string))
}

/// Resolve a session id to the serialized user key it holds.
pub async fn session_key(
    store: &dyn SessionStore,
    session_id: &str,
) -> Result<Option<String>, SessionError> {
    Ok(store.get(session_id).await?.map(|s| s.user_key))
}

/// Start a session for `user_key`, returning the new session id and the
/// cookie headers to send.
///
/// A previous session id is discarded so a login always gets a fresh id.
#[tracing::instrument(skip_all)]
pub async fn login_session(
    store: &dyn SessionStore,
    previous_session_id: Option<&str>,
    user_key: &str,
) -> Result<(String, HeaderMap), SessionError> {
    if let Some(previous) = previous_session_id {
        store.remove(previous).await?;
    }

    let session_id = gen_random_string(32)?;
    let ttl = *SESSION_COOKIE_MAX_AGE;
    let stored_session = StoredSession {
        user_key: user_key.to_string(),
        expires_at: Utc::now() + Duration::seconds(ttl as i64),
        ttl,
    };
    store.put(&session_id, stored_session).await?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        ttl as i64,
    )?;

    tracing::debug!("Created session cookie");
    Ok((session_id, headers))
}

/// End the session (if any) and return headers that expire the cookie.
pub async fn logout_session(
    store: &dyn SessionStore,
    session_id: Option<&str>,
) -> Result<HeaderMap, SessionError> {
    if let Some(session_id) = session_id {
        store.remove(session_id).await?;
    }

    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, SESSION_COOKIE_NAME.as_str(), "value", -86400)?;
    Ok(headers)
}
