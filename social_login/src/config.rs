//! Central configuration for the social_login crate

use std::sync::LazyLock;

/// Key of the section holding this crate's settings inside the configuration document
pub const SOCIAL_LOGIN_SECTION: &str = "social-login";

/// Path of the section listing the enabled strategies
pub(crate) static STRATEGIES_PATH: LazyLock<String> =
    LazyLock::new(|| format!("{SOCIAL_LOGIN_SECTION}.strategies"));

/// Path of the logout route inside the configuration document
pub static LOGOUT_URL_PATH: LazyLock<String> =
    LazyLock::new(|| format!("{SOCIAL_LOGIN_SECTION}.logoutUrl"));

/// Path of the JSON configuration file read by `ConfigSource::load`
///
/// Default: "config/default.json"
pub static SOCIAL_LOGIN_CONFIG_FILE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SOCIAL_LOGIN_CONFIG_FILE")
        .unwrap_or_else(|_| "config/default.json".to_string())
});

/// Inline JSON deep-merged over the configuration file, if set
pub(crate) const SOCIAL_LOGIN_CONFIG_ENV: &str = "SOCIAL_LOGIN_CONFIG";
