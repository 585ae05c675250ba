//! The pluggable authentication layer: strategies are registered by name and
//! run on demand, users are (de)serialized through caller-supplied hooks.

mod errors;
mod registry;
mod traits;
mod types;

pub use errors::AuthError;
pub use registry::{Authenticator, StrategyModules};
pub use traits::{Strategy, StrategyFactory, UserSerializer, VerifyCallback};
pub use types::{AuthRequest, OAuthTokens, Profile, StrategyOutcome, Verified};
