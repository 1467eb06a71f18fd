//! Small filesystem helpers shared by the config store and the process registry.

mod atomic;

pub use atomic::{write_atomic, write_atomic_private};
