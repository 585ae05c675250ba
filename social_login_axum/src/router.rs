//! Attaching the login routes to an application router

use axum::{Router, extract::Request, middleware::from_fn_with_state, routing::get};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use social_login::{
    Authenticator, ConfigSource, InMemorySessionStore, LOGOUT_URL_PATH, SOCIAL_LOGIN_SECTION,
    SessionStore, SocialLoginError, StrategyModules, configure_strategies,
};

use super::context::LoginState;
use super::handlers::AuthFunctions;
use super::middleware::session_layer;
use super::routes::{authentication_route, callback_route, logout_route};

/// Wires the configured providers into an application.
///
/// For every provider present under `social-login.strategies` the strategy
/// is built from its module, registered, and two GET routes are bound: the
/// provider's `authenticationUrl` and the path of its `callbackUrl`. A single
/// GET route is bound to `social-login.logoutUrl`.
///
/// # Example
///
/// ```no_run
/// # use axum::Router;
/// # use social_login::{ConfigSource, StrategyModules};
/// # use social_login_axum::{AuthFunctions, SocialLogin};
/// # #[derive(Clone)] struct User;
/// # fn demo(functions: AuthFunctions<User>, modules: StrategyModules<User>, config: ConfigSource)
/// # -> Result<(), Box<dyn std::error::Error>> {
/// let app: Router = Router::new();
/// let app = SocialLogin::new(functions, modules).attach(app, &config)?;
/// # Ok(())
/// # }
/// ```
pub struct SocialLogin<U> {
    functions: AuthFunctions<U>,
    modules: StrategyModules<U>,
    store: Arc<dyn SessionStore>,
    trace: bool,
}

impl<U> SocialLogin<U>
where
    U: Clone + Send + Sync + 'static,
{
    pub fn new(functions: AuthFunctions<U>, modules: StrategyModules<U>) -> Self {
        Self {
            functions,
            modules,
            store: Arc::new(InMemorySessionStore::new()),
            trace: true,
        }
    }

    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Skip the HTTP tracing layer on the login routes.
    ///
    /// Use this if you want to add your own tracing middleware.
    pub fn without_trace(mut self) -> Self {
        self.trace = false;
        self
    }

    /// Load the configuration from its usual sources, fill in `options` as
    /// module defaults, and attach.
    pub fn attach_with_defaults(self, app: Router, options: Value) -> Result<Router, SocialLoginError> {
        let mut config = ConfigSource::load()?;
        config.set_module_defaults(SOCIAL_LOGIN_SECTION, options);
        self.attach(app, &config)
    }

    /// Bind the login routes and the session layer onto `app`.
    ///
    /// The session layer covers the routes `app` has at this point, so
    /// attach after declaring the application's own routes.
    pub fn attach(self, app: Router, config: &ConfigSource) -> Result<Router, SocialLoginError> {
        let descriptors = configure_strategies(config)?;
        let logout_url = config.get_str(LOGOUT_URL_PATH.as_str())?.to_string();

        let mut authenticator = Authenticator::new(self.functions.serializer.clone());
        for descriptor in descriptors.values() {
            let strategy = self
                .modules
                .instantiate(descriptor, self.functions.verify.clone())?;
            authenticator.use_strategy(strategy);
        }

        let state = Arc::new(LoginState {
            authenticator,
            store: self.store,
            routes: self.functions.routes,
        });

        let mut bound = HashSet::new();
        let mut routes = Router::new();

        for descriptor in descriptors.into_values() {
            let descriptor = Arc::new(descriptor);
            check_route(&mut bound, &descriptor.authentication_url)?;
            check_route(&mut bound, &descriptor.callback_path)?;

            let (route_state, route_descriptor) = (state.clone(), descriptor.clone());
            routes = routes.route(
                &descriptor.authentication_url,
                get(move |req: Request| {
                    authentication_route(route_state, route_descriptor, req)
                }),
            );

            let (route_state, route_descriptor) = (state.clone(), descriptor.clone());
            routes = routes.route(
                &descriptor.callback_path,
                get(move |req: Request| callback_route(route_state, route_descriptor, req)),
            );

            tracing::info!(
                "Registered {} login at {} (callback {})",
                descriptor.name,
                descriptor.authentication_url,
                descriptor.callback_path
            );
        }

        check_route(&mut bound, &logout_url)?;
        let logout_state = state.clone();
        routes = routes.route(
            &logout_url,
            get(move |req: Request| logout_route(logout_state, req)),
        );
        tracing::info!("Registered logout at {}", logout_url);

        if self.trace {
            routes = routes.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            );
        }

        Ok(app
            .merge(routes)
            .layer(from_fn_with_state(state, session_layer::<U>)))
    }
}

/// Reject paths axum would panic on, and paths bound twice.
fn check_route(bound: &mut HashSet<String>, path: &str) -> Result<(), SocialLoginError> {
    let invalid = |reason: &str| SocialLoginError::InvalidRoute {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        || path.contains(['{', '}'])
    {
        return Err(invalid("route parameters are not supported"));
    }
    if !bound.insert(path.to_string()) {
        return Err(invalid("bound more than once"));
    }
    Ok(())
}
