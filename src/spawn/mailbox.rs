/*!
 * Spawn Mailbox
 * Capacity-one hand-off slot between a requester and the spawn proxy
 */

use super::types::SpawnRequest;
use crate::core::errors::SpawnError;
use crate::core::sync::Semaphore;
use crate::core::types::Pid;
use parking_lot::Mutex;

/// Slot contents while an indirect spawn is in flight.
struct Slot {
    request: Option<SpawnRequest>,
    result: Result<Pid, SpawnError>,
}

/// Shared parameter block for indirect spawns.
///
/// There is no argument-passing channel across the task-creation boundary,
/// so the request travels through this slot instead. At most one request
/// occupies it at a time: requesters serialize on `exclusion`, and
/// `completion` carries the 0 -> 1 signal that the proxy has published its
/// result. The completion post happens-after the result write, so the
/// requester never observes a stale result.
pub(super) struct Mailbox {
    exclusion: Semaphore,
    completion: Semaphore,
    slot: Mutex<Slot>,
}

impl Mailbox {
    pub(super) fn new() -> Self {
        Self {
            exclusion: Semaphore::new(1),
            completion: Semaphore::new(0),
            slot: Mutex::new(Slot {
                request: None,
                result: Err(SpawnError::Incomplete),
            }),
        }
    }

    /// Block until the mailbox is free, then deposit `request` with the
    /// result reset to pending.
    pub(super) fn acquire(&self, request: SpawnRequest) {
        self.exclusion.wait();
        let mut slot = self.slot.lock();
        slot.request = Some(request);
        slot.result = Err(SpawnError::Incomplete);
    }

    /// Release an acquired mailbox with no proxy in flight (the launch
    /// failed), freeing the slot for the next requester.
    pub(super) fn abandon(&self) {
        self.slot.lock().request = None;
        self.exclusion.post();
    }

    /// Proxy side: take the deposited request out of the slot.
    pub(super) fn take_request(&self) -> Option<SpawnRequest> {
        self.slot.lock().request.take()
    }

    /// Proxy side: publish the final result. The completion signal is
    /// posted separately, after this write.
    pub(super) fn put_result(&self, result: Result<Pid, SpawnError>) {
        self.slot.lock().result = result;
    }

    /// Proxy side: wake the requester. Must be posted exactly once per
    /// deposited request.
    pub(super) fn signal_completion(&self) {
        self.completion.post();
    }

    /// Requester side: block until the proxy signals, then take the result
    /// and release the mailbox.
    pub(super) fn wait_result(&self) -> Result<Pid, SpawnError> {
        self.completion.wait();
        let result = {
            let mut slot = self.slot.lock();
            slot.request = None;
            slot.result.clone()
        };
        self.exclusion.post();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_result_round_trip() {
        let mailbox = Arc::new(Mailbox::new());
        mailbox.acquire(SpawnRequest::new("/bin/app"));

        let proxy = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                let request = mailbox.take_request().unwrap();
                assert_eq!(request.path, "/bin/app");
                mailbox.put_result(Ok(7));
                mailbox.signal_completion();
            })
        };

        assert_eq!(mailbox.wait_result(), Ok(7));
        proxy.join().unwrap();
    }

    #[test]
    fn test_abandon_frees_slot_for_next_request() {
        let mailbox = Mailbox::new();
        mailbox.acquire(SpawnRequest::new("/bin/a"));
        mailbox.abandon();

        // A second acquire must not block and must see an empty slot.
        mailbox.acquire(SpawnRequest::new("/bin/b"));
        assert_eq!(mailbox.take_request().unwrap().path, "/bin/b");
        mailbox.abandon();
    }

    #[test]
    fn test_pending_result_reads_as_incomplete() {
        let mailbox = Mailbox::new();
        mailbox.acquire(SpawnRequest::new("/bin/app"));
        mailbox.signal_completion();
        assert_eq!(mailbox.wait_result(), Err(SpawnError::Incomplete));
    }
}
