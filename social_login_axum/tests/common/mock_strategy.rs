use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use social_login_axum::{
    AuthError, AuthRequest, AuthenticateOptions, ModuleOptions, OAuthTokens, Profile, Provider,
    Strategy, StrategyFactory, StrategyOutcome, VerifyCallback,
};

/// Stands in for a provider's OAuth strategy.
///
/// Without query parameters it redirects to a fake consent page. On return
/// `code=<id>` signs in the profile `<id>`, `error=<reason>` fails, and
/// `explode` makes the strategy error out.
pub struct ScriptedStrategy<U> {
    provider: Provider,
    name: String,
    options: ModuleOptions,
    verify: Arc<dyn VerifyCallback<U>>,
}

#[async_trait]
impl<U> Strategy<U> for ScriptedStrategy<U>
where
    U: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn authenticate(
        &self,
        req: &AuthRequest,
        options: &AuthenticateOptions,
    ) -> StrategyOutcome<U> {
        if req.query_param("explode").is_some() {
            return StrategyOutcome::Error(AuthError::Strategy(
                "provider unavailable".to_string(),
            ));
        }
        if let Some(reason) = req.query_param("error") {
            return StrategyOutcome::Fail {
                challenge: Some(format!("error=\"{reason}\"")),
                status: None,
                info: None,
            };
        }

        let Some(code) = req.query_param("code") else {
            let mut location = format!(
                "https://{}.example/authorize?client_id={}&redirect_uri={}&scope={}",
                self.provider,
                self.options.client_id,
                self.options.callback_url,
                options.scopes().join("+"),
            );
            if let Some(prompt) = options.get("prompt").and_then(|v| v.as_str()) {
                location.push_str(&format!("&prompt={prompt}"));
            }
            return StrategyOutcome::Redirect { location };
        };

        let tokens = OAuthTokens {
            access_token: format!("token-{code}"),
            refresh_token: None,
            params: json!({ "token_type": "Bearer" }),
        };
        let profile = Profile {
            provider: self.provider,
            id: code.to_string(),
            display_name: req.query_param("name").map(str::to_string),
            emails: vec![format!("{code}@example.com")],
            photos: vec![],
            raw: json!({ "id": code }),
        };
        StrategyOutcome::from_verified(self.verify.verify(req, &tokens, profile).await)
    }
}

pub struct ScriptedFactory {
    provider: Provider,
    registered_name: Option<String>,
}

impl ScriptedFactory {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            registered_name: None,
        }
    }

    /// A factory whose strategy registers under a name other than the
    /// provider's.
    pub fn misnamed(provider: Provider, name: &str) -> Self {
        Self {
            provider,
            registered_name: Some(name.to_string()),
        }
    }
}

impl<U> StrategyFactory<U> for ScriptedFactory
where
    U: Send + Sync + 'static,
{
    fn build(
        &self,
        options: ModuleOptions,
        verify: Arc<dyn VerifyCallback<U>>,
    ) -> Result<Arc<dyn Strategy<U>>, AuthError> {
        if !options.pass_req_to_callback {
            return Err(AuthError::Strategy(
                "expected the request to be passed to the verify callback".to_string(),
            ));
        }
        Ok(Arc::new(ScriptedStrategy {
            provider: self.provider,
            name: self
                .registered_name
                .clone()
                .unwrap_or_else(|| self.provider.to_string()),
            options,
            verify,
        }))
    }
}
