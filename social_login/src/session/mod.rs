mod config;
mod errors;
mod main;
mod store;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{login_session, logout_session, session_id_from_headers, session_key};
pub use store::{InMemorySessionStore, SessionStore, StoredSession};
