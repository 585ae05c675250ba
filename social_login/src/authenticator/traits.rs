use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{AuthenticateOptions, ModuleOptions};

use super::errors::AuthError;
use super::types::{AuthRequest, OAuthTokens, Profile, StrategyOutcome, Verified};

/// A login mechanism, e.g. one OAuth provider's authorization code flow.
///
/// Implementations own the protocol: on the first leg they answer with
/// [`StrategyOutcome::Redirect`], on the provider's callback they exchange
/// the grant, fetch the profile and hand it to their verify callback.
#[async_trait]
pub trait Strategy<U>: Send + Sync {
    /// Name the strategy is registered under
    fn name(&self) -> &str;

    async fn authenticate(
        &self,
        req: &AuthRequest,
        options: &AuthenticateOptions,
    ) -> StrategyOutcome<U>;
}

/// Constructs a strategy from its module options and the verify callback.
pub trait StrategyFactory<U>: Send + Sync {
    fn build(
        &self,
        options: ModuleOptions,
        verify: Arc<dyn VerifyCallback<U>>,
    ) -> Result<Arc<dyn Strategy<U>>, AuthError>;
}

/// Maps a provider profile onto an application user.
///
/// The request is always passed along so the callback can, for instance,
/// link the profile to an already signed-in user.
#[async_trait]
pub trait VerifyCallback<U>: Send + Sync {
    async fn verify(
        &self,
        req: &AuthRequest,
        tokens: &OAuthTokens,
        profile: Profile,
    ) -> Result<Verified<U>, AuthError>;
}

/// Converts users to and from the key stored in the session.
#[async_trait]
pub trait UserSerializer<U>: Send + Sync {
    async fn serialize(&self, user: &U) -> Result<String, AuthError>;

    /// `Ok(None)` means the user no longer exists and the session is stale.
    async fn deserialize(&self, key: &str) -> Result<Option<U>, AuthError>;
}
