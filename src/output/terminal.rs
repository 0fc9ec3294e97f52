//! Terminal renderer: colored, flowing text.
//!
//! One entry per user with contact details underneath; blocked users are
//! flagged in red. No tables.

use colored::Colorize;

use crate::models::UserRecord;
use crate::output::{Summary, UserRenderer};

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

const MISSING: &str = "-";

impl UserRenderer for TerminalRenderer {
    fn render_list(&self, users: &[UserRecord]) -> String {
        if users.is_empty() {
            return format!("{}", "  No users found.\n".dimmed());
        }

        let mut output = String::new();
        for user in users {
            let (icon, status) = if user.is_blocked {
                ("✖".red().bold().to_string(), "blocked".red().bold().to_string())
            } else {
                ("●".green().bold().to_string(), "active".green().to_string())
            };

            output.push_str(&format!(
                " {} {} {} {}\n",
                icon,
                user.display_name().bold(),
                format!("({})", user.id).dimmed(),
                status,
            ));

            let contact: Vec<&str> = [user.email.as_deref(), user.mobile.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();
            if !contact.is_empty() {
                output.push_str(&format!("   {}\n", contact.join(" · ")));
            }
        }

        let summary = Summary::from_users(users);
        output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
        output.push_str(&format!(
            " {} {}: {} active, {} blocked\n",
            summary.total.to_string().bold(),
            if summary.total == 1 { "user" } else { "users" },
            summary.active.to_string().green().bold(),
            summary.blocked.to_string().red().bold(),
        ));

        output
    }

    fn render_detail(&self, user: &UserRecord) -> String {
        let rows: [(&str, Option<&str>); 14] = [
            ("ID", Some(user.id.as_str())),
            ("Name", user.full_name.as_deref()),
            ("Mobile", user.mobile.as_deref()),
            ("Email", user.email.as_deref()),
            ("Status", Some(if user.is_blocked { "blocked" } else { "active" })),
            ("Image", user.profile_image.as_deref()),
            ("Address", user.address.as_deref()),
            ("City", user.city.as_deref()),
            ("State", user.state.as_deref()),
            ("Country", user.country.as_deref()),
            ("Postal code", user.postal_code.as_deref()),
            ("Gender", user.gender.as_deref()),
            ("Born", user.date_of_birth.as_deref()),
            ("Created", user.created_at.as_deref()),
        ];

        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
        let mut output = format!(" {}\n", user.display_name().bold());
        for (label, value) in rows {
            let value = value.filter(|v| !v.is_empty()).unwrap_or(MISSING);
            let value = if label == "Status" && user.is_blocked {
                value.red().bold().to_string()
            } else {
                value.to_string()
            };
            output.push_str(&format!(
                "   {} {}\n",
                format!("{:<width$}", format!("{label}:")).cyan(),
                value
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> UserRecord {
        UserRecord {
            full_name: Some("John Doe".into()),
            email: Some("jd@example.com".into()),
            mobile: Some("9876543210".into()),
            city: Some("Pune".into()),
            ..UserRecord::new("u1")
        }
    }

    #[test]
    fn render_empty() {
        let output = TerminalRenderer.render_list(&[]);
        assert!(output.contains("No users found"));
    }

    #[test]
    fn render_list_shows_users_and_summary() {
        let mut blocked = UserRecord::new("u2");
        blocked.is_blocked = true;
        let output = TerminalRenderer.render_list(&[john(), blocked]);
        // Check content is present (may be wrapped in ANSI color codes)
        assert!(output.contains("John Doe"));
        assert!(output.contains("(u1)"));
        assert!(output.contains("jd@example.com · 9876543210"));
        assert!(output.contains("blocked"));
        assert!(output.contains("users"));
    }

    #[test]
    fn render_detail_shows_every_field() {
        let output = TerminalRenderer.render_detail(&john());
        assert!(output.contains("Pune"));
        assert!(output.contains("9876543210"));
        assert!(output.contains("Postal code:"));
        assert!(output.contains("active"));
    }
}
