//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::models::{OutputFormat, UserRecord};

/// Trait for rendering user lists and records to an output format.
pub trait UserRenderer {
    /// Render a (possibly filtered) list of users.
    fn render_list(&self, users: &[UserRecord]) -> String;

    /// Render every field of a single user.
    fn render_detail(&self, user: &UserRecord) -> String;
}

/// Renderer for the given output format.
pub fn renderer_for(format: OutputFormat) -> Box<dyn UserRenderer> {
    match format {
        OutputFormat::Terminal => Box::new(terminal::TerminalRenderer),
        OutputFormat::Json => Box::new(json::JsonRenderer),
    }
}

/// Summary statistics for a rendered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub blocked: usize,
}

impl Summary {
    /// Compute summary from a list of users.
    pub fn from_users(users: &[UserRecord]) -> Self {
        let blocked = users.iter().filter(|u| u.is_blocked).count();
        Summary {
            total: users.len(),
            active: users.len() - blocked,
            blocked,
        }
    }
}
