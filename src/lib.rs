//! cfctl: command-line client for a Cloud Foundry style control-plane API.
//!
//! Commands declare ordered requirements (login, targeting, API version, resource
//! lookups) that are evaluated before the command performs its API call. Repositories
//! speak Cloud Controller v2 through a synchronous `Gateway`.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod net;
pub mod requirements;
pub mod terminal;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::ApiError;
