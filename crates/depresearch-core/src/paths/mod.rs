//! Path utilities for the depresearch configuration directory.
//!
//! Every file the tool persists lives under a single per-user directory:
//! - `config.json` (port and model)
//! - `.env` (the API key, kept out of the JSON)
//! - `server.pid` / `server.lock` / `server.log` (background server tracking)
//! - `workspace/` (where the agent clones repositories)
//!
//! # Design
//!
//! - Paths are resolved once into [`AppPaths`] and passed explicitly
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Environment overrides are read only in `platform`

mod ensure;
mod error;
mod platform;
mod resolver;

pub use ensure::ensure_directory;
pub use error::PathError;
pub use platform::{HOME_ENV_VAR, SERVER_DIR_ENV_VAR, config_root};
pub use resolver::AppPaths;
