use http::{Result as HttpResponse, StatusCode};
use social_login::{AuthError, SocialLoginError};

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Errors reaching a route are server-side faults, except a user the
/// serializer refuses, which means the request cannot be tied to a user.
impl<T> IntoResponseError<T> for Result<T, SocialLoginError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let e = e.log();
            let status = match e {
                SocialLoginError::Auth(AuthError::Serialization(_)) => StatusCode::UNAUTHORIZED,
                SocialLoginError::Auth(_)
                | SocialLoginError::Config(_)
                | SocialLoginError::Session(_)
                | SocialLoginError::InvalidRoute { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
