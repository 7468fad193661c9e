/*!
 * Scheduler Interface
 * Trait seam toward the host scheduler plus the preemption lock guard
 */

mod types;

pub use types::SchedulingPolicy;

use crate::core::errors::Errno;
use crate::core::types::{Pid, Priority};

/// Host scheduler operations consumed by the spawn subsystem.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler: Send + Sync {
    /// Set a task's priority, leaving its policy untouched.
    fn set_priority(&self, pid: Pid, priority: Priority) -> Result<(), Errno>;

    /// Change a task's policy and priority in one step.
    fn set_policy(
        &self,
        pid: Pid,
        policy: SchedulingPolicy,
        priority: Priority,
    ) -> Result<(), Errno>;

    /// Priority of the calling task.
    fn current_priority(&self) -> Priority;

    /// Disable preemption of other tasks by the scheduler. Nestable.
    fn lock_preemption(&self);

    /// Undo one `lock_preemption` call.
    fn unlock_preemption(&self);
}

/// RAII preemption lock.
///
/// Preemption is re-enabled on drop, including the early error returns out
/// of the task-creation path.
pub struct PreemptionGuard<'a> {
    scheduler: &'a dyn Scheduler,
}

impl<'a> PreemptionGuard<'a> {
    /// Lock preemption until the guard is dropped.
    pub fn lock(scheduler: &'a dyn Scheduler) -> Self {
        scheduler.lock_preemption();
        Self { scheduler }
    }
}

impl Drop for PreemptionGuard<'_> {
    fn drop(&mut self) {
        self.scheduler.unlock_preemption();
    }
}
