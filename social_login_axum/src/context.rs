use http::{HeaderMap, request::Parts};
use serde_json::Value;
use std::sync::Arc;

use social_login::{
    Authenticator, SessionStore, SocialLoginError, login_session, logout_session,
};

use super::handlers::RouteHandlers;

/// Everything the login routes and the session layer share.
pub(crate) struct LoginState<U> {
    pub(crate) authenticator: Authenticator<U>,
    pub(crate) store: Arc<dyn SessionStore>,
    pub(crate) routes: Arc<dyn RouteHandlers<U>>,
}

/// Session data resolved by the session layer, stored in request extensions.
#[derive(Clone)]
pub(crate) struct SessionUser<U> {
    pub(crate) user: Option<U>,
    pub(crate) session_id: Option<String>,
}

/// Extra information a strategy returned with a successful login.
///
/// Inserted into the request extensions before `on_callback` runs.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthInfo(pub Value);

/// Login state of the current request, handed to the route callbacks.
pub struct AuthContext<U> {
    user: Option<U>,
    session_id: Option<String>,
    state: Arc<LoginState<U>>,
}

impl<U> AuthContext<U>
where
    U: Clone + Send + Sync + 'static,
{
    pub(crate) fn from_parts(parts: &Parts, state: Arc<LoginState<U>>) -> Self {
        let (user, session_id) = match parts.extensions.get::<SessionUser<U>>() {
            Some(session) => (session.user.clone(), session.session_id.clone()),
            None => (None, None),
        };
        Self {
            user,
            session_id,
            state,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&U> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign `user` in and return the `Set-Cookie` headers to send.
    pub async fn login(&mut self, user: &U) -> Result<HeaderMap, SocialLoginError> {
        let key = self.state.authenticator.serialize_user(user).await?;
        let (session_id, headers) =
            login_session(self.state.store.as_ref(), self.session_id.as_deref(), &key).await?;
        self.user = Some(user.clone());
        self.session_id = Some(session_id);
        Ok(headers)
    }

    /// Sign the current user out and return headers expiring the cookie.
    pub async fn logout(&mut self) -> Result<HeaderMap, SocialLoginError> {
        let headers =
            logout_session(self.state.store.as_ref(), self.session_id.as_deref()).await?;
        self.user = None;
        self.session_id = None;
        Ok(headers)
    }
}
