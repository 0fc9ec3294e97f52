//! UserApi trait and the remote user service.
//!
//! Provides an abstraction over the HTTP transport so the controller can
//! be driven by a mock in tests.

pub mod http;

use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;

use crate::constants::GENERIC_FAILURE;
use crate::models::{UserPatch, UserRecord};

pub use http::HttpUserApi;

/// Optional query parameters for the list endpoint, sent in insertion order.
pub type ListParams = IndexMap<String, String>;

/// Errors from the user API.
///
/// All variants originate server-side or in the transport; the controller
/// treats them uniformly as "operation failed".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("user {id} not found")]
    NotFound { id: String, message: Option<String> },

    #[error("rejected by server: {0}")]
    Validation(String),

    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a notification: the server's own wording when
    /// it sent one, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { message: Some(msg), .. }
            | ApiError::Http { message: Some(msg), .. } => msg.clone(),
            ApiError::NotFound { id, message: None } => format!("User {id} no longer exists."),
            ApiError::Validation(msg) if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// The five operations of the remote user resource.
///
/// None of them retries; failures are returned unchanged to the caller.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch all users matching `params` (all users when empty).
    async fn list_users(&self, params: &ListParams) -> Result<Vec<UserRecord>, ApiError>;

    /// Fetch one full record.
    async fn get_user(&self, id: &str) -> Result<UserRecord, ApiError>;

    /// Apply a partial update and return the resulting record.
    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, ApiError>;

    /// Set the blocked flag through its dedicated endpoint.
    async fn set_blocked(&self, id: &str, blocked: bool) -> Result<(), ApiError>;

    /// Permanently remove a user.
    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Validation("email is invalid".into());
        assert_eq!(err.user_message(), "email is invalid");

        let err = ApiError::Http { status: 500, message: Some("db down".into()) };
        assert_eq!(err.user_message(), "db down");

        let err = ApiError::NotFound { id: "u2".into(), message: Some("No such user".into()) };
        assert_eq!(err.user_message(), "No such user");
    }

    #[test]
    fn user_message_falls_back_to_generic() {
        assert_eq!(ApiError::Transport("connection refused".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Validation("  ".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Http { status: 502, message: None }.user_message(), GENERIC_FAILURE);
        assert_eq!(
            ApiError::NotFound { id: "u2".into(), message: None }.user_message(),
            "User u2 no longer exists."
        );
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::Http { status: 503, message: Some("busy".into()) };
        assert_eq!(err.to_string(), "HTTP 503: busy");
        let err = ApiError::Http { status: 503, message: None };
        assert_eq!(err.to_string(), "HTTP 503");
    }
}
