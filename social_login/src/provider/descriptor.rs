use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::STRATEGIES_PATH;
use crate::settings::{ConfigError, ConfigSource, extend_deep};

use super::types::Provider;

/// Options handed to a strategy constructor.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
    pub pass_req_to_callback: bool,
}

impl fmt::Debug for ModuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleOptions")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("callback_url", &self.callback_url)
            .field("pass_req_to_callback", &self.pass_req_to_callback)
            .finish()
    }
}

/// Options for a single `authenticate` call.
///
/// `session`, `successRedirect` and `failureRedirect` are interpreted by the
/// route layer. Everything else (`scope`, `prompt`, ...) is kept in `extra`
/// for the strategy to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateOptions {
    #[serde(default = "default_session")]
    pub session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_redirect: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_session() -> bool {
    true
}

impl Default for AuthenticateOptions {
    fn default() -> Self {
        Self {
            session: true,
            success_redirect: None,
            failure_redirect: None,
            extra: Map::new(),
        }
    }
}

impl AuthenticateOptions {
    fn from_value(path: &str, value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// The requested scopes, whether configured as a list or as a single
    /// space separated string.
    pub fn scopes(&self) -> Vec<String> {
        match self.extra.get("scope") {
            Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Everything needed to register one provider and bind its two routes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDescriptor {
    pub provider: Provider,
    pub name: String,
    pub module_options: ModuleOptions,
    pub authentication_options: AuthenticateOptions,
    pub callback_options: AuthenticateOptions,
    pub authentication_url: String,
    pub callback_path: String,
}

/// Build a descriptor for every known provider present in the configuration.
///
/// Entries under `strategies` that do not name a known provider are skipped.
pub fn configure_strategies(
    source: &ConfigSource,
) -> Result<BTreeMap<Provider, StrategyDescriptor>, ConfigError> {
    let strategies_path = STRATEGIES_PATH.as_str();
    let configured = source
        .get(strategies_path)?
        .as_object()
        .ok_or_else(|| ConfigError::InvalidValue {
            path: strategies_path.to_string(),
            message: "expected an object keyed by provider name".to_string(),
        })?;

    for name in configured.keys() {
        if name.parse::<Provider>().is_err() {
            tracing::debug!("Ignoring unsupported strategy \"{name}\"");
        }
    }

    let mut descriptors = BTreeMap::new();
    for provider in Provider::ALL {
        let path = format!("{strategies_path}.{provider}");
        if !source.has(&path) {
            continue;
        }
        let descriptor = configure_strategy(source, provider, &path)?;
        tracing::debug!("Configured strategy: {:?}", descriptor);
        descriptors.insert(provider, descriptor);
    }

    Ok(descriptors)
}

fn configure_strategy(
    source: &ConfigSource,
    provider: Provider,
    path: &str,
) -> Result<StrategyDescriptor, ConfigError> {
    let key = |name: &str| format!("{path}.{name}");

    let authentication_options = extend_deep(
        provider.default_authentication_options(),
        optional_object(source, &key("authenticationOptions"))?,
    );
    let callback_options = optional_object(source, &key("callbackOptions"))?;

    let callback_url = source.get_str(&key("callbackUrl"))?.to_string();
    let callback_path = route_path(&key("callbackUrl"), &callback_url)?;
    let authentication_url = source.get_str(&key("authenticationUrl"))?.to_string();

    let module_options = ModuleOptions {
        client_id: source.get_str(&key("clientId"))?.to_string(),
        client_secret: source.get_str(&key("clientSecret"))?.to_string(),
        callback_url,
        pass_req_to_callback: true,
    };

    Ok(StrategyDescriptor {
        provider,
        name: provider.as_str().to_string(),
        module_options,
        authentication_options: AuthenticateOptions::from_value(
            &key("authenticationOptions"),
            authentication_options,
        )?,
        callback_options: AuthenticateOptions::from_value(
            &key("callbackOptions"),
            callback_options,
        )?,
        authentication_url,
        callback_path,
    })
}

fn optional_object(source: &ConfigSource, path: &str) -> Result<Value, ConfigError> {
    if !source.has(path) {
        return Ok(json!({}));
    }
    let value = source.get(path)?;
    if !value.is_object() {
        return Err(ConfigError::InvalidValue {
            path: path.to_string(),
            message: "expected an object".to_string(),
        });
    }
    Ok(value.clone())
}

/// The path a callback URL is served on.
///
/// The same value is given to the provider as the redirect URI, so it may be
/// absolute; the route only needs its path.
fn route_path(path: &str, callback_url: &str) -> Result<String, ConfigError> {
    if callback_url.starts_with('/') {
        let route = callback_url
            .split(['?', '#'])
            .next()
            .unwrap_or(callback_url);
        return Ok(route.to_string());
    }

    let url = url::Url::parse(callback_url).map_err(|e| ConfigError::InvalidValue {
        path: path.to_string(),
        message: format!("not a path or absolute URL: {e}"),
    })?;
    Ok(url.path().to_string())
}
