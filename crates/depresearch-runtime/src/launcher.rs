//! Detached launch of the research server.
//!
//! The server outlives the invoking `dpr` command: it runs in its own process
//! group (Unix) or as a detached process (Windows), with stdin closed and
//! stdout/stderr appended to `server.log`.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use depresearch_core::{API_KEY_VAR, AppPaths, LaunchError, LaunchRequest, ServerLauncher};
use tracing::info;

/// Port the server binds, read by the agent framework.
pub const PORT_VAR: &str = "PORT";
/// Model identifier handed to the research agent.
pub const MODEL_VAR: &str = "DEPRESEARCH_MODEL";
/// Directory the agent clones repositories into.
pub const WORKSPACE_VAR: &str = "DEPRESEARCH_WORKSPACE_DIR";

const DEFAULT_PROGRAM: &str = if cfg!(windows) { "npx.cmd" } else { "npx" };
const DEFAULT_ARGS: [&str; 2] = ["mastra", "dev"];

#[derive(Debug, Clone)]
pub struct DetachedLauncher {
    program: OsString,
    args: Vec<OsString>,
    server_dir: PathBuf,
    log_path: PathBuf,
}

impl DetachedLauncher {
    /// Launcher running `npx mastra dev` inside `server_dir`.
    pub fn new(server_dir: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.into(),
            args: DEFAULT_ARGS.into_iter().map(OsString::from).collect(),
            server_dir: server_dir.into(),
            log_path: log_path.into(),
        }
    }

    pub fn from_paths(paths: &AppPaths) -> Self {
        Self::new(paths.server_dir(), paths.log_file())
    }

    /// Replace the command that starts the server.
    #[must_use]
    pub fn with_command<I, S>(mut self, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn build_command(&self, request: &LaunchRequest) -> Result<Command, LaunchError> {
        if !self.server_dir.is_dir() {
            return Err(LaunchError::MissingServerDir(self.server_dir.clone()));
        }

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| spawn_error("create log directory", &e))?;
        }
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| spawn_error("open server log", &e))?;
        let stderr_log = log_file
            .try_clone()
            .map_err(|e| spawn_error("open server log", &e))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.server_dir)
            .env(PORT_VAR, request.port.to_string())
            .env(API_KEY_VAR, &request.api_key)
            .env(MODEL_VAR, &request.model)
            .env(WORKSPACE_VAR, &request.workspace_dir)
            .stdin(Stdio::null())
            .stdout(log_file)
            .stderr(stderr_log);

        detach(&mut cmd);
        Ok(cmd)
    }
}

impl ServerLauncher for DetachedLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<u32, LaunchError> {
        let mut cmd = self.build_command(request)?;
        let child = cmd.spawn().map_err(|e| {
            spawn_error(&format!("start {}", self.program.to_string_lossy()), &e)
        })?;

        let pid = child.id();
        if pid == 0 {
            return Err(LaunchError::Spawn("spawned process reported no PID".to_string()));
        }

        // Dropping the handle does not wait for or kill the child.
        drop(child);

        info!(
            pid,
            port = request.port,
            log = %self.log_path.display(),
            "spawned research server"
        );
        Ok(pid)
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    // New process group: terminal signals such as Ctrl-C no longer reach the server.
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    const DETACHED_PROCESS: u32 = 0x0000_0008;

    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP | DETACHED_PROCESS);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

fn spawn_error(action: &str, e: &std::io::Error) -> LaunchError {
    LaunchError::Spawn(format!("failed to {action}: {e}"))
}
