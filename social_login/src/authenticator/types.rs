use http::{HeaderMap, Method, StatusCode, Uri};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::provider::Provider;

use super::errors::AuthError;

/// The parts of an incoming request a strategy or verify callback may need.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
}

impl AuthRequest {
    pub fn new(method: Method, uri: &Uri, headers: HeaderMap) -> Self {
        let query = uri
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();

        Self {
            method,
            path: uri.path().to_string(),
            query,
            headers,
        }
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Normalized user profile returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub provider: Provider,
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub raw: Value,
}

#[derive(Clone, Default)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Any additional parameters of the token response
    pub params: Value,
}

impl fmt::Debug for OAuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokens")
            .field("access_token", &"[redacted]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .field("params", &self.params)
            .finish()
    }
}

/// What a verify callback decided about a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<U> {
    pub user: Option<U>,
    pub info: Option<Value>,
}

impl<U> Verified<U> {
    pub fn user(user: U) -> Self {
        Self {
            user: Some(user),
            info: None,
        }
    }

    pub fn rejected(info: Option<Value>) -> Self {
        Self { user: None, info }
    }

    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Some(info);
        self
    }
}

/// Result of running a strategy against one request.
#[derive(Debug)]
pub enum StrategyOutcome<U> {
    /// Send the browser elsewhere, typically to the provider's consent page
    Redirect { location: String },
    Success { user: U, info: Option<Value> },
    /// `challenge` is sent as `WWW-Authenticate`; `info` is what the verify
    /// callback returned with its rejection.
    Fail {
        challenge: Option<String>,
        status: Option<StatusCode>,
        info: Option<Value>,
    },
    Error(AuthError),
}

impl<U> StrategyOutcome<U> {
    /// Map a verify callback result onto an outcome.
    pub fn from_verified(result: Result<Verified<U>, AuthError>) -> Self {
        match result {
            Ok(Verified {
                user: Some(user),
                info,
            }) => StrategyOutcome::Success { user, info },
            Ok(Verified { user: None, info }) => StrategyOutcome::Fail {
                challenge: None,
                status: None,
                info,
            },
            Err(e) => StrategyOutcome::Error(e),
        }
    }
}
