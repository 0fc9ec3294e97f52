//! userdesk — admin client for managing user accounts (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod env;
pub mod models;
pub mod output;
pub mod store;
