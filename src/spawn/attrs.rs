/*!
 * Attribute Application
 * Best-effort scheduling overrides for a freshly created task
 */

use super::types::{SpawnAttributes, SpawnFlags};
use crate::core::types::Pid;
use crate::sched::Scheduler;
use log::warn;

/// Apply scheduling overrides to `pid`.
///
/// The task is already created and eligible to run, so failures here are
/// logged and swallowed rather than unwinding the spawn: the task simply
/// keeps default scheduling behavior.
pub fn apply(scheduler: &dyn Scheduler, pid: Pid, attributes: Option<&SpawnAttributes>) {
    let attr = match attributes {
        Some(attr) => attr,
        None => return,
    };

    let set_param = attr.flags.contains(SpawnFlags::SETSCHEDPARAM);
    let set_policy = attr.flags.contains(SpawnFlags::SETSCHEDULER);

    if set_param && !set_policy {
        if let Err(e) = scheduler.set_priority(pid, attr.priority) {
            warn!("Priority {} not applied to task {}: {}", attr.priority, pid, e);
        }
    }

    if set_policy {
        // A policy change always carries a priority. Use the explicit
        // attribute priority when one was given, otherwise the caller's
        // own, so the change does not silently zero the task's priority.
        let priority = if set_param {
            attr.priority
        } else {
            scheduler.current_priority()
        };

        if let Err(e) = scheduler.set_policy(pid, attr.policy, priority) {
            warn!("Policy {:?} not applied to task {}: {}", attr.policy, pid, e);
        }
    }
}
