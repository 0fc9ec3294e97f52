//! CLI command definitions and terminal interaction.
//!
//! Uses clap derive macros for argument definitions; confirmation
//! prompts and notifications go to stderr so stdout only carries
//! rendered output.

pub mod args;

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use userdesk::controller::{Confirm, Notifier, Prompt};
use userdesk::models::{Level, Notification};

/// Asks on stderr and reads `y`/`N` from stdin.
///
/// A non-interactive stdin declines every prompt, so scripted runs need
/// `--yes` to mutate anything.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &Prompt) -> bool {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return false;
        }

        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle);
        let title = if prompt.destructive {
            format!("⚠ {}", prompt.title).red().bold()
        } else {
            prompt.title.bold()
        };
        let _ = writeln!(handle, "  {title}");
        let _ = writeln!(handle, "  {}", prompt.message);
        let _ = write!(handle, "  {} [y/N] ", prompt.confirm_label.cyan());
        let _ = handle.flush();
        drop(handle);

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints notifications to stderr with a colored icon.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "  {}", format_notification(&notification));
        if let Some(ref hint) = notification.hint {
            let _ = writeln!(handle, "    {}", hint.dimmed());
        }
        let _ = handle.flush();
    }
}

fn format_notification(n: &Notification) -> String {
    let icon = match n.level {
        Level::Info => "ℹ".blue().bold(),
        Level::Success => "✔".green().bold(),
        Level::Error => "✖".red().bold(),
    };
    let message = match n.level {
        Level::Error => n.message.red().to_string(),
        _ => n.message.clone(),
    };
    format!("{icon} {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn notification_keeps_message_text() {
        let rendered = format_notification(&Notification::success("User deleted successfully."));
        assert!(rendered.contains("User deleted successfully."));
    }

    #[test]
    fn notify_does_not_panic() {
        TerminalNotifier.notify(Notification::error("boom").with_hint("retry"));
    }
}
