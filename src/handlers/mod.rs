//! Command handlers for the CLI

mod analyze;
mod support;

pub use analyze::handle_analyze;
pub use support::handle_support;
