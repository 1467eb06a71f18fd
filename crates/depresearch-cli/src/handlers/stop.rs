//! Stop command handler.

use depresearch_core::StopOutcome;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext) -> Result<StopOutcome, CliError> {
    let outcome = ctx.lifecycle().stop()?;
    println!("{outcome}");
    Ok(outcome)
}
