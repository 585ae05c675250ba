use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::{AuthenticateOptions, Provider, StrategyDescriptor};

use super::errors::AuthError;
use super::traits::{Strategy, StrategyFactory, UserSerializer, VerifyCallback};
use super::types::{AuthRequest, StrategyOutcome};

/// Strategy constructors supplied by the application, one per provider.
pub struct StrategyModules<U> {
    factories: HashMap<Provider, Arc<dyn StrategyFactory<U>>>,
}

impl<U> Default for StrategyModules<U> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<U> StrategyModules<U>
where
    U: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Provider, factory: Arc<dyn StrategyFactory<U>>) -> Self {
        self.insert(provider, factory);
        self
    }

    pub fn insert(&mut self, provider: Provider, factory: Arc<dyn StrategyFactory<U>>) {
        if self.factories.insert(provider, factory).is_some() {
            tracing::warn!("Replacing strategy module for {provider}");
        }
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.factories.contains_key(&provider)
    }

    /// Build the strategy a descriptor calls for.
    pub fn instantiate(
        &self,
        descriptor: &StrategyDescriptor,
        verify: Arc<dyn VerifyCallback<U>>,
    ) -> Result<Arc<dyn Strategy<U>>, AuthError> {
        let factory = self
            .factories
            .get(&descriptor.provider)
            .ok_or_else(|| AuthError::MissingStrategyModule(descriptor.name.clone()))?;

        let strategy = factory.build(descriptor.module_options.clone(), verify)?;
        if strategy.name() != descriptor.name {
            return Err(AuthError::StrategyNameMismatch {
                expected: descriptor.name.clone(),
                actual: strategy.name().to_string(),
            });
        }
        Ok(strategy)
    }
}

/// Registry of strategies plus the user (de)serialization hooks.
pub struct Authenticator<U> {
    strategies: HashMap<String, Arc<dyn Strategy<U>>>,
    serializer: Arc<dyn UserSerializer<U>>,
}

impl<U> Authenticator<U>
where
    U: Send + Sync + 'static,
{
    pub fn new(serializer: Arc<dyn UserSerializer<U>>) -> Self {
        Self {
            strategies: HashMap::new(),
            serializer,
        }
    }

    /// Register `strategy` under its own name, replacing any previous one.
    pub fn use_strategy(&mut self, strategy: Arc<dyn Strategy<U>>) {
        let name = strategy.name().to_string();
        tracing::debug!("Registering strategy \"{name}\"");
        if self.strategies.insert(name.clone(), strategy).is_some() {
            tracing::warn!("Strategy \"{name}\" was already registered and has been replaced");
        }
    }

    pub fn strategy(&self, name: &str) -> Option<Arc<dyn Strategy<U>>> {
        self.strategies.get(name).cloned()
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub async fn authenticate(
        &self,
        name: &str,
        req: &AuthRequest,
        options: &AuthenticateOptions,
    ) -> Result<StrategyOutcome<U>, AuthError> {
        let strategy = self
            .strategies
            .get(name)
            .ok_or_else(|| AuthError::UnknownStrategy(name.to_string()))?;
        tracing::debug!("Authenticating with \"{name}\" on {}", req.path);
        Ok(strategy.authenticate(req, options).await)
    }

    pub async fn serialize_user(&self, user: &U) -> Result<String, AuthError> {
        self.serializer.serialize(user).await
    }

    pub async fn deserialize_user(&self, key: &str) -> Result<Option<U>, AuthError> {
        self.serializer.deserialize(key).await
    }
}
