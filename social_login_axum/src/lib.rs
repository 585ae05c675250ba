//! Axum integration for `social-login`.
//!
//! [`SocialLogin`] binds the routes of every configured provider plus the
//! logout route onto an application router and installs the session layer
//! that makes [`AuthUser`] available to the application's handlers.

mod config;
mod context;
mod error;
mod handlers;
mod middleware;
mod router;
mod routes;
mod session;

pub use config::SOCIAL_LOGIN_REDIRECT_ANON;
pub use context::{AuthContext, AuthInfo};
pub use handlers::{AuthFunctions, AuthenticateResult, RouteHandlers};
pub use router::SocialLogin;
pub use session::{AuthRedirect, AuthUser};

// Re-export what applications need to implement strategies and callbacks
pub use social_login::{
    AuthError, AuthRequest, AuthenticateOptions, ConfigError, ConfigSource, InMemorySessionStore,
    ModuleOptions, OAuthTokens, Profile, Provider, SessionStore, SocialLoginError, Strategy,
    StrategyFactory, StrategyModules, StrategyOutcome, UserSerializer, Verified, VerifyCallback,
};
