//! Command line configuration, parsing, and validation.

mod cli;
mod types;
mod validation;

pub use cli::{Cli, Command, ServerArgs};
pub use types::*;
pub use validation::{ConfigError, parse_listen_address, validate_metrics_path};
