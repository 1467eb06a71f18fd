//! Config command handler.

use depresearch_core::{ConfigKey, mask_secret};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::{CliError, SET_API_KEY_HINT};

/// Execute the config command.
pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Set { key, value } => {
            println!("✓ {}", set(ctx, &key, &value)?);
        }
        ConfigCommand::Get { key } => match get(ctx, &key)? {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("⚠ No API key configured.");
                eprintln!("  Run: {SET_API_KEY_HINT}");
            }
        },
    }
    Ok(())
}

/// Validate and persist a value; returns the confirmation line.
pub fn set(ctx: &CliContext, key: &str, value: &str) -> Result<String, CliError> {
    let key: ConfigKey = key.parse()?;
    ctx.config_service().set(key, value)?;

    let shown = if key.is_secret() {
        mask_secret(value.trim())
    } else {
        value.trim().to_string()
    };
    Ok(format!("{key} set to {shown}"))
}

/// Current value for display; the API key is masked. `None` if no key is stored.
pub fn get(ctx: &CliContext, key: &str) -> Result<Option<String>, CliError> {
    let key: ConfigKey = key.parse()?;
    let value = ctx.config_service().get(key)?;
    Ok(value.map(|v| if key.is_secret() { mask_secret(&v) } else { v }))
}
