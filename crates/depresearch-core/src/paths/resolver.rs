//! Resolved application paths.
//!
//! [`AppPaths`] captures the configuration root once at start-up. Every
//! component receives it (or a path derived from it) explicitly, which keeps
//! tests free of environment mutation: they build one from a temp directory.

use std::fmt;
use std::path::{Path, PathBuf};

use super::PathError;
use super::platform::{config_root, server_dir_override};

const CONFIG_FILE: &str = "config.json";
const ENV_FILE: &str = ".env";
const PID_FILE: &str = "server.pid";
const LOCK_FILE: &str = "server.lock";
const LOG_FILE: &str = "server.log";
const WORKSPACE_DIR: &str = "workspace";
const SERVER_DIR: &str = "server";

/// All depresearch paths, derived from one configuration root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
    server_dir: PathBuf,
}

impl AppPaths {
    /// Resolve paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        let root = config_root()?;
        let server_dir = server_dir_override().unwrap_or_else(|| root.join(SERVER_DIR));
        Ok(Self { root, server_dir })
    }

    /// Build paths under an explicit root, ignoring the environment.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            server_dir: root.join(SERVER_DIR),
            root,
        }
    }

    /// Override the server project directory.
    #[must_use]
    pub fn with_server_dir(mut self, server_dir: impl Into<PathBuf>) -> Self {
        self.server_dir = server_dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// The `.env`-style file holding the API key.
    pub fn env_file(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    pub fn pid_file(&self) -> PathBuf {
        self.root.join(PID_FILE)
    }

    /// Advisory lock guarding spawn-and-record across invocations.
    pub fn lock_file(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Where the background server's stdout/stderr are appended.
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Directory the research agent clones repositories into.
    pub fn workspace_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Project directory the background server is launched from.
    pub fn server_dir(&self) -> &Path {
        &self.server_dir
    }
}

impl fmt::Display for AppPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "config_root = {}", self.root.display())?;
        writeln!(f, "config_file = {}", self.config_file().display())?;
        writeln!(f, "env_file = {}", self.env_file().display())?;
        writeln!(f, "pid_file = {}", self.pid_file().display())?;
        writeln!(f, "lock_file = {}", self.lock_file().display())?;
        writeln!(f, "log_file = {}", self.log_file().display())?;
        writeln!(f, "workspace_dir = {}", self.workspace_dir().display())?;
        write!(f, "server_dir = {}", self.server_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_root() {
        let paths = AppPaths::from_root("/tmp/dpr-home");
        for path in [
            paths.config_file(),
            paths.env_file(),
            paths.pid_file(),
            paths.lock_file(),
            paths.log_file(),
            paths.workspace_dir(),
        ] {
            assert!(path.starts_with("/tmp/dpr-home"), "{} escaped root", path.display());
        }
        assert!(paths.pid_file().ends_with("server.pid"));
        assert!(paths.env_file().ends_with(".env"));
    }

    #[test]
    fn server_dir_can_be_overridden() {
        let paths = AppPaths::from_root("/tmp/dpr-home").with_server_dir("/opt/dpr-server");
        assert_eq!(paths.server_dir(), Path::new("/opt/dpr-server"));
    }

    #[test]
    fn display_format_is_parseable() {
        let output = AppPaths::from_root("/tmp/dpr-home").to_string();
        for key in ["config_root", "config_file", "env_file", "pid_file", "workspace_dir"] {
            assert!(output.contains(&format!("{key} = ")), "missing {key}");
        }
    }
}
