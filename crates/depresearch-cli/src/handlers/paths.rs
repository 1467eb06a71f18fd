//! Paths command handler.
//!
//! Displays all resolved paths in `key = value` format for diagnostics.

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext) {
    println!("{}", ctx.paths());
}
