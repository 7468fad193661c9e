/*!
 * Thread-Backed Task Launcher
 * Runs raw task bodies on named OS threads
 */

use super::{TaskEntry, TaskLauncher};
use crate::core::errors::Errno;
use crate::core::types::{Pid, Priority};
use log::{debug, warn};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

/// `TaskLauncher` that backs each task with a detached OS thread.
///
/// Priorities are cooperative in this launcher: the requested priority is
/// recorded for diagnostics but not mapped onto OS thread priorities.
pub struct ThreadLauncher {
    next_pid: AtomicU32,
}

impl ThreadLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_pid: AtomicU32::new(1),
        }
    }
}

impl Default for ThreadLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskLauncher for ThreadLauncher {
    fn create_task(
        &self,
        name: &str,
        priority: Priority,
        stack_size: usize,
        entry: TaskEntry,
    ) -> Result<Pid, Errno> {
        let pid = self.next_pid.fetch_add(1, Ordering::Relaxed);
        let builder = thread::Builder::new()
            .name(format!("{}-{}", name, pid))
            .stack_size(stack_size);

        match builder.spawn(entry) {
            Ok(_handle) => {
                // Detached: task completion is reported through whatever
                // channel the entry body carries, not by join.
                debug!(
                    "Task {} launched on a thread (name: {}, priority: {})",
                    pid, name, priority
                );
                Ok(pid)
            }
            Err(e) => {
                warn!("Failed to launch task thread {}: {}", name, e);
                Err(Errno::Again)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PROXY_STACK_SIZE;
    use std::sync::mpsc;

    #[test]
    fn test_entry_body_runs() {
        let launcher = ThreadLauncher::new();
        let (tx, rx) = mpsc::channel();

        let pid = launcher
            .create_task(
                "worker",
                10,
                PROXY_STACK_SIZE,
                Box::new(move || tx.send(42).unwrap()),
            )
            .unwrap();

        assert!(pid > 0);
        assert_eq!(rx.recv().unwrap(), 42);
    }

    #[test]
    fn test_pids_are_unique() {
        let launcher = ThreadLauncher::new();
        let a = launcher
            .create_task("a", 1, PROXY_STACK_SIZE, Box::new(|| {}))
            .unwrap();
        let b = launcher
            .create_task("b", 1, PROXY_STACK_SIZE, Box::new(|| {}))
            .unwrap();
        assert_ne!(a, b);
    }
}
