use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Login providers this crate knows how to wire.
///
/// The set is closed; entries under `strategies` with any other name are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Amazon,
    Facebook,
    Google,
}

impl Provider {
    /// Every provider, in registration order.
    pub const ALL: [Provider; 3] = [Provider::Amazon, Provider::Facebook, Provider::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Amazon => "amazon",
            Provider::Facebook => "facebook",
            Provider::Google => "google",
        }
    }

    /// Options passed to the strategy on the authentication route unless the
    /// configuration overrides them.
    pub fn default_authentication_options(&self) -> Value {
        match self {
            Provider::Amazon => json!({ "scope": ["profile"] }),
            Provider::Facebook => json!({}),
            Provider::Google => json!({ "scope": "https://www.googleapis.com/auth/plus.login" }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amazon" => Ok(Provider::Amazon),
            "facebook" => Ok(Provider::Facebook),
            "google" => Ok(Provider::Google),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}
