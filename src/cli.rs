//! CLI domain: parse, route, help and output only.
//! Command behavior lives in `commands`; this layer turns clap types into invocations.

mod help;
mod output;
mod parse;
mod route;

pub use help::{command_name, invocation};
pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
