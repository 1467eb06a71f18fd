//! Terminate the background server by PID (no Child handle available).

use std::io;

/// Send SIGTERM to `pid`.
///
/// When `pid` leads its own process group, as servers started by
/// [`DetachedLauncher`](crate::DetachedLauncher) do, the whole group is
/// signalled so helper processes exit with it. On Windows the process tree
/// is killed.
///
/// The server is not awaited or reaped: it was started by an earlier
/// invocation and is not our child.
///
/// # Returns
/// - `Ok(())` if the signal was delivered or the process is already gone
/// - `Err` if signalling fails for any other reason
pub fn terminate_pid(pid: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        terminate_pid_unix(pid)
    }

    #[cfg(not(unix))]
    {
        terminate_pid_windows(pid)
    }
}

#[cfg(unix)]
fn terminate_pid_unix(pid: u32) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::{self, Pid};

    let raw = i32::try_from(pid)
        .ok()
        .filter(|&raw| raw > 0)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid PID {pid}")))?;

    let target = Pid::from_raw(raw);
    let is_group_leader = unistd::getpgid(Some(target)).is_ok_and(|pgid| pgid == target);
    let result = if is_group_leader {
        signal::killpg(target, Signal::SIGTERM)
    } else {
        signal::kill(target, Signal::SIGTERM)
    };

    match result {
        Ok(()) => {
            tracing::debug!(pid, group = is_group_leader, "sent SIGTERM");
            Ok(())
        }
        Err(Errno::ESRCH) => {
            tracing::debug!(pid, "process already gone");
            Ok(())
        }
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(not(unix))]
fn terminate_pid_windows(pid: u32) -> io::Result<()> {
    let status = std::process::Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/T"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("taskkill exited with {status}")))
    }
}
