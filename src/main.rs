//! userdesk — admin client for managing user accounts.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userdesk::api;
use userdesk::config;
use userdesk::constants;
use userdesk::controller;
use userdesk::env;
use userdesk::output;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::{HttpUserApi, ListParams};
use cli::args::{Cli, Command, EditArgs, ListArgs};
use cli::{TerminalConfirm, TerminalNotifier};
use config::Config;
use controller::{ActionOutcome, AssumeYes, Confirm, EditRequest, UserController};
use env::Env;
use output::UserRenderer;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    init_logging(cli.verbose, &env);

    let mut config = resolve_config(&cli, &env)?;
    if let Some(format) = cli.format {
        config.display.format = format;
    }

    let api = HttpUserApi::new(&config.api).context("failed to set up API client")?;
    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalConfirm)
    };
    let controller = UserController::new(Arc::new(api), confirm, Arc::new(TerminalNotifier));
    let renderer = output::renderer_for(config.display.format);

    match cli.command {
        Command::List(args) => run_list(&controller, renderer.as_ref(), args).await,
        Command::Show { id } => run_show(&controller, renderer.as_ref(), &id).await,
        Command::Edit(args) => run_edit(&controller, args).await,
        Command::Block { id } => run_set_blocked(&controller, &id, Some(true)).await,
        Command::Unblock { id } => run_set_blocked(&controller, &id, Some(false)).await,
        Command::ToggleBlock { id } => run_set_blocked(&controller, &id, None).await,
        Command::Delete { id } => run_delete(&controller, &id).await,
    }
}

/// Install the stderr log subscriber. `USERDESK_LOG` wins over `-v`.
fn init_logging(verbose: bool, env: &Env) {
    let default = if verbose { "userdesk=debug" } else { "warn" };
    let filter = env
        .non_empty(constants::ENV_LOG)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load layered config, then apply connection flags from the command line.
fn resolve_config(cli: &Cli, env: &Env) -> Result<Config> {
    let cwd = std::env::current_dir().ok();
    let mut config = Config::load(cwd.as_deref(), env).context("failed to load configuration")?;
    if let Some(ref base_url) = cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(ref token) = cli.token {
        config.api.token = Some(token.clone());
    }
    Ok(config)
}

/// Turn an operation outcome into the process result.
fn finish(outcome: ActionOutcome, what: &str) -> Result<()> {
    if outcome.is_failure() {
        bail!("{what} failed");
    }
    Ok(())
}

async fn run_list(controller: &UserController, renderer: &dyn UserRenderer, args: ListArgs) -> Result<()> {
    let outcome = controller.load(args.list_params()).await;
    finish(outcome, "listing users")?;

    controller.set_search(args.search);
    print!("{}", renderer.render_list(&controller.visible_users()));
    Ok(())
}

async fn run_show(controller: &UserController, renderer: &dyn UserRenderer, id: &str) -> Result<()> {
    match controller.view(id).await {
        Some(user) => {
            print!("{}", renderer.render_detail(&user));
            Ok(())
        }
        None => bail!("could not load user {id}"),
    }
}

/// Edit sends only fields that differ from the server's current record.
async fn run_edit(controller: &UserController, args: EditArgs) -> Result<()> {
    let Some(current) = controller.view(&args.id).await else {
        bail!("could not load user {}", args.id);
    };
    let request = EditRequest::from_changes(&current, &args.proposed());

    // Seed the store so the updated record can be reconciled in place.
    finish(controller.load(ListParams::new()).await, "listing users")?;
    finish(controller.edit(request).await, "updating user")
}

/// `target` of `None` toggles the current state.
async fn run_set_blocked(controller: &UserController, id: &str, target: Option<bool>) -> Result<()> {
    finish(controller.load(ListParams::new()).await, "listing users")?;
    let outcome = match target {
        Some(blocked) => controller.set_blocked(id, blocked).await,
        None => controller.toggle_block(id).await,
    };
    finish(outcome, "changing blocked state")
}

async fn run_delete(controller: &UserController, id: &str) -> Result<()> {
    finish(controller.load(ListParams::new()).await, "listing users")?;
    finish(controller.delete(id).await, "deleting user")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_aborts_command() {
        let err = finish(ActionOutcome::Failed, "listing users").unwrap_err();
        assert_eq!(err.to_string(), "listing users failed");
    }

    #[test]
    fn other_outcomes_continue() {
        for outcome in [
            ActionOutcome::Applied,
            ActionOutcome::Cancelled,
            ActionOutcome::Busy,
            ActionOutcome::Unchanged,
        ] {
            assert!(finish(outcome, "listing users").is_ok());
        }
    }
}
