//! Error types for wiring social login

use thiserror::Error;

use crate::authenticator::AuthError;
use crate::session::SessionError;
use crate::settings::ConfigError;

/// Errors that can occur while registering or serving the login routes
#[derive(Error, Debug)]
pub enum SocialLoginError {
    /// Configuration could not be read or is incomplete
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the authentication layer
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Error from session operations
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A configured URL cannot be used as a route
    #[error("Invalid route \"{path}\": {reason}")]
    InvalidRoute { path: String, reason: String },
}

impl SocialLoginError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Config(err) => tracing::error!("Configuration error: {}", err),
            Self::Auth(err) => tracing::error!("Authentication error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
            Self::InvalidRoute { path, reason } => {
                tracing::error!("Invalid route \"{}\": {}", path, reason)
            }
        }
        self
    }
}
