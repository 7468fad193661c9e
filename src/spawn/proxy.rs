/*!
 * Spawn Proxy
 * Body of the surrogate task that performs descriptor setup and launch
 */

use super::file_actions;
use super::mailbox::Mailbox;
use super::spawner::Spawner;
use log::{debug, warn};

/// Entry body of the spawn proxy task.
///
/// Runs with no arguments of its own: the request is read from the
/// mailbox, whose exclusion semaphore guarantees it belongs to exactly one
/// requester. Replays the file actions against the proxy's descriptor
/// table (inherited by the new task), then creates and configures the
/// task, publishes the result, and signals completion.
pub(super) fn run(spawner: &Spawner) {
    // The requester blocks until this fires; it must be posted on every
    // exit from this body, so the post rides on a drop guard.
    let _signal = CompletionSignal::new(&spawner.mailbox);

    let request = match spawner.mailbox.take_request() {
        Some(request) => request,
        None => {
            // Requester protocol violated; leave the pending result in
            // place for it to observe.
            warn!("Spawn proxy started with an empty mailbox");
            return;
        }
    };

    debug!(
        "Spawn proxy replaying {} file action(s) for {}",
        request.file_actions.len(),
        request.path
    );

    let result = file_actions::replay(spawner.fd_table.as_ref(), &request.file_actions).and_then(
        |()| spawner.exec_with_attrs(&request.path, request.attributes.as_ref(), &request.argv),
    );

    spawner.mailbox.put_result(result);
}

/// Posts the mailbox completion semaphore exactly once, on drop.
///
/// This is the only path that unblocks the requester; tying it to drop
/// keeps the requester from being stranded by an early return.
struct CompletionSignal<'a> {
    mailbox: &'a Mailbox,
}

impl<'a> CompletionSignal<'a> {
    fn new(mailbox: &'a Mailbox) -> Self {
        Self { mailbox }
    }
}

impl Drop for CompletionSignal<'_> {
    fn drop(&mut self) {
        self.mailbox.signal_completion();
    }
}
