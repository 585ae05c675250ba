//! A stand-in for real provider strategies so the demo runs without
//! registering OAuth clients anywhere.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use social_login_axum::{
    AuthError, AuthRequest, AuthenticateOptions, ModuleOptions, OAuthTokens, Profile, Provider,
    Strategy, StrategyFactory, StrategyModules, StrategyOutcome, VerifyCallback,
};

/// Skips the consent page: the first leg redirects straight to the
/// callback URL with a fake authorization code.
struct DevStrategy<U> {
    provider: Provider,
    options: ModuleOptions,
    verify: Arc<dyn VerifyCallback<U>>,
}

#[async_trait]
impl<U> Strategy<U> for DevStrategy<U>
where
    U: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.provider.as_str()
    }

    async fn authenticate(
        &self,
        req: &AuthRequest,
        options: &AuthenticateOptions,
    ) -> StrategyOutcome<U> {
        if let Some(error) = req.query_param("error") {
            return StrategyOutcome::Fail {
                challenge: Some(error.to_string()),
                status: None,
                info: None,
            };
        }

        let Some(code) = req.query_param("code") else {
            tracing::debug!(
                "{} consent skipped, requested scopes: {:?}",
                self.provider,
                options.scopes()
            );
            return StrategyOutcome::Redirect {
                location: format!("{}?code=dev-{}", self.options.callback_url, self.provider),
            };
        };

        let tokens = OAuthTokens {
            access_token: format!("{}-{}", self.options.client_id, code),
            refresh_token: None,
            params: json!({ "token_type": "Bearer" }),
        };
        let profile = Profile {
            provider: self.provider,
            id: code.to_string(),
            display_name: Some(format!("{} demo user", self.provider)),
            emails: vec![format!("{code}@{}.example", self.provider)],
            photos: vec![],
            raw: json!({ "id": code }),
        };
        StrategyOutcome::from_verified(self.verify.verify(req, &tokens, profile).await)
    }
}

struct DevStrategyFactory(Provider);

impl<U> StrategyFactory<U> for DevStrategyFactory
where
    U: Send + Sync + 'static,
{
    fn build(
        &self,
        options: ModuleOptions,
        verify: Arc<dyn VerifyCallback<U>>,
    ) -> Result<Arc<dyn Strategy<U>>, AuthError> {
        if options.client_id.is_empty() {
            return Err(AuthError::Strategy(format!(
                "{}: clientId must not be empty",
                self.0
            )));
        }
        Ok(Arc::new(DevStrategy {
            provider: self.0,
            options,
            verify,
        }))
    }
}

pub(crate) fn dev_modules<U>() -> StrategyModules<U>
where
    U: Send + Sync + 'static,
{
    Provider::ALL
        .into_iter()
        .fold(StrategyModules::new(), |modules, provider| {
            modules.with(provider, Arc::new(DevStrategyFactory(provider)))
        })
}
