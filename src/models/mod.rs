//! Shared types used across all modules.
//!
//! This module defines the user records exchanged with the API, the
//! notifications surfaced to the operator, and the output format enum.
//! Other modules import from here rather than reaching into each other's
//! internals.

pub mod notification;
pub mod user;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use notification::{Level, Notification};
pub use user::{UserPatch, UserRecord};

/// How lists and records are printed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Colored, human-readable text.
    #[default]
    Terminal,
    /// Pretty-printed JSON on stdout.
    Json,
}
