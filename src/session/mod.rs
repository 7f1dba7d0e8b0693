pub mod api_session;
pub mod auth;
pub mod dto;
pub mod legi_session;
pub mod types;
pub mod urls;

pub use api_session::ApiSession;
pub use auth::{AuthError, AuthSession, TokenStore};
pub use legi_session::LegiSession;
pub use types::{AnalyticsApi, ApiError, GENERIC_ERROR_MESSAGE};
pub use urls::*;
