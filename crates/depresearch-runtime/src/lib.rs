//! OS and network adapters for depresearch.
//!
//! Implements the port traits from `depresearch-core`:
//!
//! - [`PidFileRegistry`]: PID file, null-signal liveness, SIGTERM and an advisory lock
//! - [`HttpHealthProbe`]: `GET /api/agents` with a short timeout
//! - [`DetachedLauncher`]: spawns the server in its own process group
//!
//! plus [`AgentClient`], the request/response client for the research agent.

pub mod agent_client;
pub mod health;
pub mod launcher;
pub mod pidfile;
pub mod registry;
pub mod shutdown;

pub use agent_client::{AgentClient, AgentClientError, RESEARCH_AGENT_ID};
pub use health::{HEALTH_PATH, HttpHealthProbe};
pub use launcher::DetachedLauncher;
pub use pidfile::ServerLock;
pub use registry::PidFileRegistry;
