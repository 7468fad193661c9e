/*!
 * Shared Test Fixtures
 * In-memory fake collaborators for spawn integration tests
 */

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};
use task_spawn::{
    Errno, Fd, FdTable, Loader, Mode, OFlags, Pid, Priority, Scheduler, SchedulingPolicy,
    SymbolTable, TaskEntry, TaskLauncher, ThreadLauncher,
};

/// Priority reported for every calling task by the fake scheduler.
pub const CALLER_PRIORITY: Priority = 100;

/// Loader handing out sequential task identifiers, with one-shot failure
/// injection.
pub struct FakeLoader {
    next_pid: AtomicU32,
    fail_with: Mutex<Option<Errno>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self {
            next_pid: AtomicU32::new(100),
            fail_with: Mutex::new(None),
        }
    }

    pub fn fail_next(&self, errno: Errno) {
        *self.fail_with.lock() = Some(errno);
    }
}

impl Loader for FakeLoader {
    fn exec(&self, _path: &str, _argv: &[String], _symtab: &SymbolTable) -> Result<Pid, Errno> {
        if let Some(e) = self.fail_with.lock().take() {
            return Err(e);
        }
        Ok(self.next_pid.fetch_add(1, Ordering::Relaxed))
    }
}

/// Scheduler fake recording per-task priority/policy and preemption depth.
pub struct FakeScheduler {
    pub priorities: DashMap<Pid, Priority>,
    pub policies: DashMap<Pid, SchedulingPolicy>,
    preemption_depth: AtomicI32,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self {
            priorities: DashMap::new(),
            policies: DashMap::new(),
            preemption_depth: AtomicI32::new(0),
        }
    }

    pub fn preemption_depth(&self) -> i32 {
        self.preemption_depth.load(Ordering::SeqCst)
    }
}

impl Scheduler for FakeScheduler {
    fn set_priority(&self, pid: Pid, priority: Priority) -> Result<(), Errno> {
        self.priorities.insert(pid, priority);
        Ok(())
    }

    fn set_policy(
        &self,
        pid: Pid,
        policy: SchedulingPolicy,
        priority: Priority,
    ) -> Result<(), Errno> {
        self.policies.insert(pid, policy);
        self.priorities.insert(pid, priority);
        Ok(())
    }

    fn current_priority(&self) -> Priority {
        CALLER_PRIORITY
    }

    fn lock_preemption(&self) {
        self.preemption_depth.fetch_add(1, Ordering::SeqCst);
    }

    fn unlock_preemption(&self) {
        self.preemption_depth.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Descriptor-table fake with an ordered event log.
pub struct FakeFdTable {
    files: DashMap<Fd, String>,
    next_fd: AtomicU32,
    unopenable: DashMap<String, Errno>,
    events: Mutex<Vec<String>>,
}

impl FakeFdTable {
    /// Table pre-populated with the three standard descriptors.
    pub fn new() -> Self {
        let files = DashMap::new();
        files.insert(0, "/dev/stdin".to_string());
        files.insert(1, "/dev/stdout".to_string());
        files.insert(2, "/dev/stderr".to_string());
        Self {
            files,
            next_fd: AtomicU32::new(3),
            unopenable: DashMap::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn refuse_open(&self, path: &str, errno: Errno) {
        self.unopenable.insert(path.to_string(), errno);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn path_at(&self, fd: Fd) -> Option<String> {
        self.files.get(&fd).map(|p| p.clone())
    }

    fn log(&self, event: String) {
        self.events.lock().push(event);
    }
}

impl FdTable for FakeFdTable {
    fn open(&self, path: &str, _flags: OFlags, _mode: Mode) -> Result<Fd, Errno> {
        if let Some(errno) = self.unopenable.get(path) {
            return Err(*errno);
        }
        let fd = self.next_fd.fetch_add(1, Ordering::SeqCst);
        self.files.insert(fd, path.to_string());
        self.log(format!("open {} -> {}", path, fd));
        Ok(fd)
    }

    fn close(&self, fd: Fd) -> Result<(), Errno> {
        self.log(format!("close {}", fd));
        match self.files.remove(&fd) {
            Some(_) => Ok(()),
            None => Err(Errno::BadF),
        }
    }

    fn dup2(&self, from: Fd, to: Fd) -> Result<(), Errno> {
        let path = match self.files.get(&from) {
            Some(p) => p.clone(),
            None => return Err(Errno::BadF),
        };
        self.files.insert(to, path);
        self.log(format!("dup2 {} -> {}", from, to));
        Ok(())
    }
}

/// Thread launcher wrapper that counts launches and can refuse the first
/// N of them.
pub struct FlakyLauncher {
    inner: ThreadLauncher,
    failures_left: AtomicUsize,
    launches: AtomicUsize,
}

impl FlakyLauncher {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: ThreadLauncher::new(),
            failures_left: AtomicUsize::new(failures),
            launches: AtomicUsize::new(0),
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl TaskLauncher for FlakyLauncher {
    fn create_task(
        &self,
        name: &str,
        priority: Priority,
        stack_size: usize,
        entry: TaskEntry,
    ) -> Result<Pid, Errno> {
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(Errno::Again);
        }
        self.launches.fetch_add(1, Ordering::SeqCst);
        self.inner.create_task(name, priority, stack_size, entry)
    }
}
