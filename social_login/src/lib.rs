//! social_login - configuration-driven wiring of OAuth login providers
//!
//! This crate reads which providers are enabled from a JSON configuration,
//! builds one strategy per provider through application-supplied factories,
//! and keeps them in an [`Authenticator`] together with the user
//! (de)serialization hooks. Web framework bindings live in separate crates.

mod authenticator;
mod config;
mod errors;
mod provider;
mod session;
mod settings;
mod utils;

pub use authenticator::{
    AuthError, AuthRequest, Authenticator, OAuthTokens, Profile, Strategy, StrategyFactory,
    StrategyModules, StrategyOutcome, UserSerializer, Verified, VerifyCallback,
};
pub use config::{LOGOUT_URL_PATH, SOCIAL_LOGIN_CONFIG_FILE, SOCIAL_LOGIN_SECTION};
pub use errors::SocialLoginError;
pub use provider::{
    AuthenticateOptions, ModuleOptions, Provider, StrategyDescriptor, UnknownProvider,
    configure_strategies,
};
pub use session::{
    InMemorySessionStore, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionError,
    SessionStore, StoredSession, login_session, logout_session, session_id_from_headers,
    session_key,
};
pub use settings::{ConfigError, ConfigSource, extend_deep};
pub use utils::UtilError;
