//! Atomic PID file I/O operations.
//!
//! Format: a single line holding the decimal PID.

use std::fs;
use std::io;
use std::path::Path;

use depresearch_core::utils::write_atomic;

/// Write the PID file atomically (temp file + rename).
pub fn write_pidfile(path: &Path, pid: u32) -> io::Result<()> {
    write_atomic(path, &format!("{pid}\n"))
}

/// Read the recorded PID.
///
/// Missing files, garbage and PID 0 all read as `None`.
pub fn read_pidfile(path: &Path) -> Option<u32> {
    let content = fs::read_to_string(path).ok()?;
    parse_pidfile_content(&content)
}

/// Delete the PID file (idempotent - no error if missing).
pub fn delete_pidfile(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn parse_pidfile_content(content: &str) -> Option<u32> {
    content
        .lines()
        .next()
        .and_then(|line| line.trim().parse::<u32>().ok())
        .filter(|&pid| pid != 0)
}
