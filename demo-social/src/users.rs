use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use social_login_axum::{
    AuthError, AuthRequest, OAuthTokens, Profile, UserSerializer, Verified, VerifyCallback,
};

#[derive(Clone, Debug)]
pub(crate) struct DemoUser {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) provider: String,
}

/// Users seen so far, keyed by `provider:profile id`.
#[derive(Default)]
pub(crate) struct DemoUsers {
    users: RwLock<HashMap<String, DemoUser>>,
}

#[async_trait]
impl VerifyCallback<DemoUser> for DemoUsers {
    async fn verify(
        &self,
        _req: &AuthRequest,
        _tokens: &OAuthTokens,
        profile: Profile,
    ) -> Result<Verified<DemoUser>, AuthError> {
        let id = format!("{}:{}", profile.provider, profile.id);
        let mut users = self.users.write().await;

        if let Some(user) = users.get(&id) {
            tracing::debug!("Returning user {}", user.id);
            return Ok(Verified::user(user.clone()));
        }

        let user = DemoUser {
            id: id.clone(),
            name: profile.display_name.unwrap_or_else(|| profile.id.clone()),
            email: profile.emails.into_iter().next(),
            provider: profile.provider.to_string(),
        };
        tracing::info!("Created user {}", user.id);
        users.insert(id, user.clone());
        Ok(Verified::user(user))
    }
}

#[async_trait]
impl UserSerializer<DemoUser> for DemoUsers {
    async fn serialize(&self, user: &DemoUser) -> Result<String, AuthError> {
        Ok(user.id.clone())
    }

    async fn deserialize(&self, key: &str) -> Result<Option<DemoUser>, AuthError> {
        Ok(self.users.read().await.get(key).cloned())
    }
}
