//! Environment knobs for the axum integration

use std::sync::LazyLock;

/// Where `AuthUser` sends anonymous GET requests
/// Default: "/"
pub static SOCIAL_LOGIN_REDIRECT_ANON: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SOCIAL_LOGIN_REDIRECT_ANON").unwrap_or_else(|_| "/".to_string())
});
