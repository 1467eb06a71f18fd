//! Platform-specific resolution of the configuration root.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that relocates the whole configuration directory.
pub const HOME_ENV_VAR: &str = "DEPRESEARCH_HOME";

/// Environment variable pointing at the server project to launch.
pub const SERVER_DIR_ENV_VAR: &str = "DEPRESEARCH_SERVER_DIR";

const DEFAULT_DIR_NAME: &str = ".depresearch";

/// Get the root directory for configuration and runtime state.
///
/// Resolution order:
/// 1. `DEPRESEARCH_HOME` environment variable (highest priority)
/// 2. `~/.depresearch`
pub fn config_root() -> Result<PathBuf, PathError> {
    root_from(env::var_os(HOME_ENV_VAR), dirs::home_dir())
}

pub(super) fn root_from(
    override_dir: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = non_empty(override_dir) {
        return Ok(PathBuf::from(dir));
    }

    home.map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or(PathError::NoHomeDir)
}

pub(super) fn server_dir_override() -> Option<PathBuf> {
    non_empty(env::var_os(SERVER_DIR_ENV_VAR)).map(PathBuf::from)
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
