//! Launcher and registry against real processes.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use depresearch_core::{AppPaths, LaunchRequest, ProcessRegistry, ServerLauncher};
use depresearch_runtime::{DetachedLauncher, PidFileRegistry};
use tempfile::tempdir;

fn wait_for_log(path: &Path, needle: &str) -> String {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let contents = fs::read_to_string(path).unwrap_or_default();
        if contents.contains(needle) || Instant::now() > deadline {
            return contents;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

fn wait_until_dead(registry: &PidFileRegistry, pid: u32) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if !registry.is_alive(pid) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

#[test]
fn launcher_passes_configuration_through_child_environment() {
    let temp = tempdir().unwrap();
    let paths = AppPaths::from_root(temp.path()).with_server_dir(temp.path());
    let launcher = DetachedLauncher::from_paths(&paths).with_command(
        "sh",
        [
            "-c",
            "echo \"port=$PORT key=$OPENROUTER_API_KEY model=$DEPRESEARCH_MODEL ws=$DEPRESEARCH_WORKSPACE_DIR done\"",
        ],
    );
    let request = LaunchRequest {
        port: 7999,
        model: "openrouter/openai/gpt-4o".to_string(),
        api_key: "sk-child-only".to_string(),
        workspace_dir: paths.workspace_dir(),
    };

    let pid = launcher.launch(&request).unwrap();
    assert!(pid > 0);

    let log = wait_for_log(&paths.log_file(), "done");
    assert!(log.contains("port=7999"), "log was: {log}");
    assert!(log.contains("key=sk-child-only"));
    assert!(log.contains("model=openrouter/openai/gpt-4o"));
    assert!(log.contains(&format!("ws={}", paths.workspace_dir().display())));

    // The secret is only in the child's environment.
    assert_ne!(
        std::env::var("OPENROUTER_API_KEY").ok().as_deref(),
        Some("sk-child-only")
    );
}

#[test]
fn registry_terminates_spawned_server() {
    let temp = tempdir().unwrap();
    let paths = AppPaths::from_root(temp.path()).with_server_dir(temp.path());
    let launcher = DetachedLauncher::from_paths(&paths).with_command("sleep", ["30"]);
    let registry = PidFileRegistry::from_paths(&paths);
    let request = LaunchRequest {
        port: 7999,
        model: "m".to_string(),
        api_key: "k".to_string(),
        workspace_dir: paths.workspace_dir(),
    };

    let pid = launcher.launch(&request).unwrap();
    registry.write_pid(pid).unwrap();
    assert!(registry.is_alive(pid));

    registry.terminate(pid).unwrap();
    // Null-signal probes still see an unreaped zombie, so reap it here.
    assert!(reap_after_sigterm(pid));
    assert!(wait_until_dead(&registry, pid));

    registry.remove().unwrap();
    assert_eq!(registry.read_pid(), None);
}

fn reap_after_sigterm(pid: u32) -> bool {
    use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
    use nix::unistd::Pid;

    let deadline = Instant::now() + Duration::from_secs(5);
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    while Instant::now() < deadline {
        match waitpid(Pid::from_raw(raw), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                return signal == nix::sys::signal::Signal::SIGTERM;
            }
            Ok(WaitStatus::StillAlive) => std::thread::sleep(Duration::from_millis(20)),
            Ok(_) | Err(_) => return false,
        }
    }
    false
}
