//! PID file tracking for the background server.
//!
//! A single `server.pid` records which process is ours. It is written only
//! after a successful spawn and removed by `dpr stop` or when found stale.
//! `server.lock` serialises spawn-and-record across concurrent invocations.

mod io;
mod lock;
mod verify;

pub use io::{delete_pidfile, read_pidfile, write_pidfile};
pub use lock::ServerLock;
pub use verify::pid_exists;
