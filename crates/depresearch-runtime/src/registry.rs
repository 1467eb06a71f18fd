//! [`ProcessRegistry`] backed by `server.pid` and `server.lock`.

use std::path::{Path, PathBuf};

use depresearch_core::{AppPaths, ProcessRegistry, RegistryError, RegistryLock};

use crate::pidfile::{ServerLock, delete_pidfile, pid_exists, read_pidfile, write_pidfile};
use crate::shutdown::terminate_pid;

#[derive(Debug, Clone)]
pub struct PidFileRegistry {
    pid_path: PathBuf,
    lock_path: PathBuf,
}

impl PidFileRegistry {
    pub fn new(pid_path: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            pid_path: pid_path.into(),
            lock_path: lock_path.into(),
        }
    }

    pub fn from_paths(paths: &AppPaths) -> Self {
        Self::new(paths.pid_file(), paths.lock_file())
    }

    pub fn pid_path(&self) -> &Path {
        &self.pid_path
    }
}

impl ProcessRegistry for PidFileRegistry {
    fn read_pid(&self) -> Option<u32> {
        read_pidfile(&self.pid_path)
    }

    fn write_pid(&self, pid: u32) -> Result<(), RegistryError> {
        write_pidfile(&self.pid_path, pid).map_err(|source| RegistryError::PidFile {
            path: self.pid_path.clone(),
            source,
        })
    }

    fn remove(&self) -> Result<(), RegistryError> {
        delete_pidfile(&self.pid_path).map_err(|source| RegistryError::PidFile {
            path: self.pid_path.clone(),
            source,
        })
    }

    fn is_alive(&self, pid: u32) -> bool {
        pid_exists(pid)
    }

    fn terminate(&self, pid: u32) -> Result<(), RegistryError> {
        terminate_pid(pid).map_err(|e| RegistryError::Signal {
            pid,
            reason: e.to_string(),
        })
    }

    fn lock(&self) -> Result<RegistryLock, RegistryError> {
        let lock = ServerLock::acquire(&self.lock_path).map_err(|source| RegistryError::Lock {
            path: self.lock_path.clone(),
            source,
        })?;
        Ok(RegistryLock::new(lock))
    }
}
