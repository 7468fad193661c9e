/*!
 * Task Spawn Library
 * posix_spawn-style task creation for a single-address-space system
 */

pub mod core;
pub mod exec;
pub mod fd;
pub mod sched;
pub mod spawn;

// Re-exports
pub use crate::core::errors::{Errno, SpawnError, SpawnResult};
pub use crate::core::sync::Semaphore;
pub use crate::core::types::{Fd, Mode, OFlags, Pid, Priority, PROXY_STACK_SIZE};
pub use exec::{Loader, SymbolTable, TaskEntry, TaskLauncher, ThreadLauncher};
pub use fd::FdTable;
pub use sched::{PreemptionGuard, Scheduler, SchedulingPolicy};
pub use spawn::{FileAction, FileActions, SpawnAttributes, SpawnFlags, SpawnRequest, Spawner};
