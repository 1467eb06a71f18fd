//! Process registry port: tracks the single managed server process.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the process registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to update PID file {path}: {source}")]
    PidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to signal process {pid}: {reason}")]
    Signal { pid: u32, reason: String },
}

/// Guard for the registry's exclusive lock. Released on drop.
pub struct RegistryLock {
    _guard: Box<dyn Send>,
}

impl RegistryLock {
    pub fn new<G: Send + 'static>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }

    /// A lock that guards nothing, for single-process use and tests.
    #[must_use]
    pub fn unguarded() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for RegistryLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLock").finish_non_exhaustive()
    }
}

/// Records which process is "ours" and answers questions about it.
pub trait ProcessRegistry: Send + Sync {
    /// The recorded PID; `None` if missing or unparsable.
    fn read_pid(&self) -> Option<u32>;

    /// Record `pid`, replacing any previous record.
    fn write_pid(&self, pid: u32) -> Result<(), RegistryError>;

    /// Delete the record. No-op when absent.
    fn remove(&self) -> Result<(), RegistryError>;

    /// Whether a process with `pid` exists. A process owned by another user counts as alive.
    fn is_alive(&self, pid: u32) -> bool;

    /// Ask `pid` to shut down. A process that is already gone is not an error.
    fn terminate(&self, pid: u32) -> Result<(), RegistryError>;

    /// Block until the exclusive spawn lock is held.
    fn lock(&self) -> Result<RegistryLock, RegistryError>;
}
