//! JSON output renderer.
//!
//! Lists render as `{"users": [...], "summary": {...}}`, single records as
//! `{"user": {...}}`, matching the envelopes of the remote API.

use crate::models::UserRecord;
use crate::output::{Summary, UserRenderer};

/// JSON output renderer.
pub struct JsonRenderer;

impl UserRenderer for JsonRenderer {
    fn render_list(&self, users: &[UserRecord]) -> String {
        let output = serde_json::json!({
            "users": users,
            "summary": Summary::from_users(users),
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn render_detail(&self, user: &UserRecord) -> String {
        let output = serde_json::json!({ "user": user });
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
