//! Research command handler.
//!
//! Ensures the background server is healthy, then sends one question to the
//! research agent and prints its answer, either all at once or as it streams.

use std::io::{self, Write};

use depresearch_core::{Configuration, EnsureOutcome, ensure_directory};
use depresearch_runtime::{AgentClient, RESEARCH_AGENT_ID};
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the research command and print the answer to stdout.
pub async fn execute(ctx: &CliContext, query: &[String], stream: bool) -> Result<(), CliError> {
    let query = query.join(" ");
    if stream {
        let mut stdout = io::stdout();
        ask_streaming(ctx, &query, |text| {
            // A closed stdout only loses output; the answer is still returned.
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        })
        .await?;
        println!();
    } else {
        let answer = ask(ctx, &query).await?;
        println!();
        println!("{answer}");
    }
    Ok(())
}

/// Run one research request and return the agent's answer.
pub async fn ask(ctx: &CliContext, query: &str) -> Result<String, CliError> {
    let (client, query) = connect(ctx, query).await?;
    eprintln!("◐ Researching...");
    let answer = client.generate(RESEARCH_AGENT_ID, query).await?;
    Ok(answer)
}

/// Run one research request, handing text to `on_text` as it arrives.
///
/// Returns the full answer once the agent finishes.
pub async fn ask_streaming<F>(ctx: &CliContext, query: &str, on_text: F) -> Result<String, CliError>
where
    F: FnMut(&str),
{
    let (client, query) = connect(ctx, query).await?;
    eprintln!("◐ Researching...\n");
    let answer = client.stream(RESEARCH_AGENT_ID, query, on_text).await?;
    Ok(answer)
}

/// Validate the request and make sure a healthy server is listening.
async fn connect<'q>(ctx: &CliContext, query: &'q str) -> Result<(AgentClient, &'q str), CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::Usage("research query cannot be empty".to_string()));
    }

    // The key is checked before any network or process work.
    if ctx.config().get_secret()?.is_none() {
        return Err(CliError::MissingApiKey);
    }
    prepare_directories(ctx)?;

    eprintln!("◐ Connecting to research server...");
    let outcome = match ctx.lifecycle().ensure_running().await {
        Ok(outcome) => outcome,
        Err(err) if err.is_health_timeout() => {
            eprintln!("  Server log: {}", ctx.paths().log_file().display());
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    report(outcome);

    Ok((ctx.agent_client(outcome.port())?, query))
}

/// First-run setup: workspace directory and a default config file.
fn prepare_directories(ctx: &CliContext) -> Result<(), CliError> {
    ensure_directory(&ctx.paths().workspace_dir())?;
    if !ctx.paths().config_file().exists() {
        debug!(path = %ctx.paths().config_file().display(), "writing default configuration");
        ctx.config().write(&Configuration::default())?;
    }
    Ok(())
}

fn report(outcome: EnsureOutcome) {
    match outcome {
        EnsureOutcome::AlreadyHealthy { port } => debug!(port, "reusing running server"),
        EnsureOutcome::Adopted { pid, port } => {
            eprintln!("✓ Server (PID {pid}) is ready on port {port}");
        }
        EnsureOutcome::Spawned { pid, port } => {
            eprintln!("✓ Started server (PID {pid}) on port {port}");
        }
    }
}
