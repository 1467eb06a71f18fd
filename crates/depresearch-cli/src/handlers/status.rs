//! Status command handler.

use depresearch_core::ServerStatus;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Report the server state. Never modifies the PID file.
pub async fn execute(ctx: &CliContext) -> Result<ServerStatus, CliError> {
    let status = ctx.lifecycle().status().await?;
    println!("{status}");
    Ok(status)
}
