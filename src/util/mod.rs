//! Utility functions and helpers.

mod logging;
mod shutdown;

pub use logging::{build_filter, init_logging};
pub use shutdown::ShutdownSignal;
