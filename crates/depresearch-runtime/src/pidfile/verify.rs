//! Process liveness checks.

/// Check whether a process with `pid` exists.
///
/// # Platform behavior
/// - **Unix**: null signal; `ESRCH` means gone, anything else (including
///   `EPERM` for another user's process) means alive
/// - **Other**: conservatively reports alive for any non-zero PID
pub fn pid_exists(pid: u32) -> bool {
    if pid == 0 {
        return false;
    }

    #[cfg(unix)]
    {
        pid_exists_unix(pid)
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(unix)]
fn pid_exists_unix(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    // PIDs above i32::MAX would wrap to negative values and address process groups.
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };

    match signal::kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(_) => true,
    }
}
