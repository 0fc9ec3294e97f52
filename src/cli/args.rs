//! Clap argument types and validation.

use clap::{Args, Parser};

use userdesk::api::ListParams;
use userdesk::models::{OutputFormat, UserPatch};

/// Manage user accounts on a remote admin API.
#[derive(Parser, Debug)]
#[command(name = "userdesk", version = userdesk::constants::VERSION)]
pub struct Cli {
    /// Base URL of the user service (overrides config and USERDESK_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Answer "yes" to every confirmation prompt.
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    pub yes: bool,

    /// Log requests and controller decisions to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List users, optionally filtered.
    List(ListArgs),

    /// Show every field of one user.
    Show {
        /// User identifier.
        id: String,
    },

    /// Edit profile fields of one user. Only changed fields are sent.
    Edit(EditArgs),

    /// Block a user.
    Block {
        /// User identifier.
        id: String,
    },

    /// Unblock a user.
    Unblock {
        /// User identifier.
        id: String,
    },

    /// Block an active user or unblock a blocked one.
    ToggleBlock {
        /// User identifier.
        id: String,
    },

    /// Permanently delete a user.
    Delete {
        /// User identifier.
        id: String,
    },
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive search over name, mobile, email and id.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Extra query parameter passed to the server verbatim (repeatable).
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

impl ListArgs {
    pub fn list_params(&self) -> ListParams {
        self.params.iter().cloned().collect()
    }
}

/// Arguments for the `edit` subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// User identifier.
    pub id: String,

    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    /// Date of birth, in whatever format the server accepts.
    #[arg(long)]
    pub dob: Option<String>,
}

impl EditArgs {
    /// Fields given on the command line, before comparing with the record.
    pub fn proposed(&self) -> UserPatch {
        UserPatch {
            full_name: self.full_name.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            postal_code: self.postal_code.clone(),
            gender: self.gender.clone(),
            date_of_birth: self.dob.clone(),
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}
