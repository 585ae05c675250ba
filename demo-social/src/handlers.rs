use askama::Template;
use async_trait::async_trait;
use axum::response::{Html, IntoResponse, Redirect, Response};
use http::{StatusCode, request::Parts};

use social_login_axum::{AuthContext, AuthUser, AuthenticateResult, Provider, RouteHandlers};

use crate::users::DemoUser;

#[derive(Template)]
#[template(path = "index_user.j2")]
struct IndexTemplateUser<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "index_anon.j2")]
struct IndexTemplateAnon<'a> {
    message: &'a str,
    providers: &'a [&'a str],
}

#[derive(Template)]
#[template(path = "protected.j2")]
struct ProtectedTemplate<'a> {
    user: &'a DemoUser,
}

fn render(template: impl Template) -> Result<Html<String>, (StatusCode, String)> {
    template
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub(crate) async fn index(
    user: Option<AuthUser<DemoUser>>,
) -> Result<Html<String>, (StatusCode, String)> {
    match user {
        Some(AuthUser(u)) => {
            let message = format!("Hey {}!", u.name);
            render(IndexTemplateUser { message: &message })
        }
        None => {
            let providers: Vec<&str> = Provider::ALL.iter().map(Provider::as_str).collect();
            render(IndexTemplateAnon {
                message: "Pick a provider below to log in.",
                providers: &providers,
            })
        }
    }
}

pub(crate) async fn protected(
    AuthUser(user): AuthUser<DemoUser>,
) -> Result<Html<String>, (StatusCode, String)> {
    render(ProtectedTemplate { user: &user })
}

/// What the demo does at each stage of a login.
pub(crate) struct DemoRoutes;

#[async_trait]
impl RouteHandlers<DemoUser> for DemoRoutes {
    async fn on_authenticate(
        &self,
        result: AuthenticateResult<DemoUser>,
        mut ctx: AuthContext<DemoUser>,
        _parts: Parts,
    ) -> Response {
        if let Some(e) = result.error {
            tracing::error!("Login failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
        let Some(user) = result.user else {
            tracing::info!("Login refused: {:?}", result.info);
            return Redirect::to("/").into_response();
        };
        match ctx.login(&user).await {
            Ok(headers) => (headers, Redirect::to("/protected")).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }

    async fn on_callback(
        &self,
        user: DemoUser,
        _ctx: AuthContext<DemoUser>,
        _parts: Parts,
    ) -> Response {
        tracing::info!("{} logged in with {}", user.id, user.provider);
        Redirect::to("/protected").into_response()
    }

    async fn on_logout(&self, mut ctx: AuthContext<DemoUser>, _parts: Parts) -> Response {
        if let Some(user) = ctx.user() {
            tracing::info!("{} logged out", user.id);
        }
        match ctx.logout().await {
            Ok(headers) => (headers, Redirect::to("/")).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}
