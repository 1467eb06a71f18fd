//! `dpr config` behavior against a temporary configuration directory.

mod common;

use depresearch_cli::CliError;
use depresearch_cli::handlers::config;
use depresearch_core::ConfigError;
use tempfile::tempdir;

#[test]
fn port_round_trips() {
    let temp = tempdir().unwrap();
    let ctx = common::context(temp.path());

    assert_eq!(config::get(&ctx, "port").unwrap().as_deref(), Some("7891"));

    let message = config::set(&ctx, "port", "9000").unwrap();
    assert_eq!(message, "port set to 9000");
    assert_eq!(config::get(&ctx, "port").unwrap().as_deref(), Some("9000"));
}

#[test]
fn invalid_port_is_rejected_and_previous_value_kept() {
    let temp = tempdir().unwrap();
    let ctx = common::context(temp.path());
    config::set(&ctx, "port", "9000").unwrap();

    for bad in ["0", "65536", "abc", "90x"] {
        let err = config::set(&ctx, "port", bad).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidPort(_))));
        assert_eq!(err.exit_code(), 1);
    }
    assert_eq!(config::get(&ctx, "port").unwrap().as_deref(), Some("9000"));
}

#[test]
fn api_key_is_masked_on_display() {
    let temp = tempdir().unwrap();
    let ctx = common::context(temp.path());

    assert_eq!(config::get(&ctx, "api-key").unwrap(), None);

    let message = config::set(&ctx, "api-key", "sk-or-v1-abcdefghijklmnop").unwrap();
    assert!(!message.contains("abcdefghijklmnop"));

    let shown = config::get(&ctx, "api-key").unwrap().unwrap();
    assert_eq!(shown, "sk-or-v1...mnop");

    let env = std::fs::read_to_string(ctx.paths().env_file()).unwrap();
    assert_eq!(env, "OPENROUTER_API_KEY=sk-or-v1-abcdefghijklmnop\n");
}

#[test]
fn model_is_stored_as_given() {
    let temp = tempdir().unwrap();
    let ctx = common::context(temp.path());

    config::set(&ctx, "model", "openai/gpt-4o").unwrap();
    assert_eq!(
        config::get(&ctx, "model").unwrap().as_deref(),
        Some("openai/gpt-4o")
    );
}

#[test]
fn unknown_key_fails_with_valid_key_list() {
    let temp = tempdir().unwrap();
    let ctx = common::context(temp.path());

    let err = config::set(&ctx, "temperature", "0.2").unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::UnknownKey(_))));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("api-key, model, port"));

    assert!(config::get(&ctx, "temperature").is_err());
    assert!(!ctx.paths().config_file().exists());
}
