//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services through the context
//!   3. Format output for the terminal
//!
//! Results go to stdout; progress and warnings go to stderr so answers can be piped.

pub mod config;
pub mod paths;
pub mod research;
pub mod status;
pub mod stop;
