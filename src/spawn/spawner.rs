/*!
 * Spawn Coordinator
 * Public spawn entry points and the create+configure step
 */

use super::attrs;
use super::mailbox::Mailbox;
use super::proxy;
use super::types::{FileActions, SpawnAttributes, SpawnRequest};
use crate::core::errors::{SpawnError, SpawnResult};
use crate::core::types::{Pid, PROXY_STACK_SIZE};
use crate::exec::{Loader, SymbolTable, TaskLauncher};
use crate::fd::FdTable;
use crate::sched::{PreemptionGuard, Scheduler};
use log::{debug, info};
use std::sync::Arc;

/// Task spawn coordinator.
///
/// Owns the mailbox and the collaborator handles. All indirect spawns that
/// go through one spawner serialize on its mailbox; additional callers
/// block until the in-flight request completes, they never fail.
pub struct Spawner {
    pub(super) loader: Arc<dyn Loader>,
    pub(super) scheduler: Arc<dyn Scheduler>,
    pub(super) fd_table: Arc<dyn FdTable>,
    pub(super) launcher: Arc<dyn TaskLauncher>,
    pub(super) symtab: Arc<SymbolTable>,
    pub(super) mailbox: Arc<Mailbox>,
}

impl Spawner {
    pub fn new(
        loader: Arc<dyn Loader>,
        scheduler: Arc<dyn Scheduler>,
        fd_table: Arc<dyn FdTable>,
        launcher: Arc<dyn TaskLauncher>,
        symtab: SymbolTable,
    ) -> Self {
        info!("Spawner initialized ({} exported symbol(s))", symtab.len());
        Self {
            loader,
            scheduler,
            fd_table,
            launcher,
            symtab: Arc::new(symtab),
            mailbox: Arc::new(Mailbox::new()),
        }
    }

    /// Spawn a new task from an executable image.
    ///
    /// With no file actions the task is created directly from the calling
    /// task. Otherwise the request is handed through the mailbox to a
    /// proxy task, which rewires its own descriptor table (inherited by
    /// the new task), creates the task, and signals back. The call blocks
    /// until a result is available; there is no timeout and no
    /// cancellation once the request is handed off.
    pub fn spawn(&self, request: SpawnRequest) -> SpawnResult<Pid> {
        if request.path.is_empty() {
            return Err(SpawnError::EmptyPath);
        }

        if request.file_actions.is_empty() {
            // Direct path: no descriptor rewiring, no proxy needed.
            return self.exec_with_attrs(&request.path, request.attributes.as_ref(), &request.argv);
        }

        self.spawn_via_proxy(request)
    }

    /// Indirect path: ship the request to a proxy task running at the
    /// caller's priority.
    fn spawn_via_proxy(&self, request: SpawnRequest) -> SpawnResult<Pid> {
        let path = request.path.clone();
        self.mailbox.acquire(request);

        // The proxy runs at the caller's own priority so the hand-off does
        // not invert scheduling order.
        let priority = self.scheduler.current_priority();

        let spawner = self.clone();
        let launched = self.launcher.create_task(
            "spawn-proxy",
            priority,
            PROXY_STACK_SIZE,
            Box::new(move || proxy::run(&spawner)),
        );

        if let Err(e) = launched {
            // No proxy exists to signal completion; free the mailbox so
            // the next requester is not wedged behind a dead request.
            self.mailbox.abandon();
            return Err(SpawnError::ProxyFailed(e));
        }

        let result = self.mailbox.wait_result();
        debug!("Indirect spawn of {} finished: {:?}", path, result);
        result
    }

    /// Create the task and apply its attributes under the preemption lock,
    /// so the new task never runs an instruction with default attributes
    /// when overrides were requested.
    pub(super) fn exec_with_attrs(
        &self,
        path: &str,
        attributes: Option<&SpawnAttributes>,
        argv: &[String],
    ) -> SpawnResult<Pid> {
        let _lock = PreemptionGuard::lock(self.scheduler.as_ref());

        let pid = self
            .loader
            .exec(path, argv, &self.symtab)
            .map_err(SpawnError::ExecFailed)?;

        attrs::apply(self.scheduler.as_ref(), pid, attributes);

        info!("Task {} spawned from {}", pid, path);
        Ok(pid)
    }

    /// POSIX-compat entry point: returns 0 on success or an errno value.
    ///
    /// On success the new task's identifier is written through `pid_out`
    /// when one is supplied. `envp` is accepted for interface
    /// compatibility only; the new task always inherits the calling task's
    /// environment.
    pub fn posix_spawn(
        &self,
        pid_out: Option<&mut Pid>,
        path: &str,
        file_actions: Option<&FileActions>,
        attributes: Option<&SpawnAttributes>,
        argv: &[String],
        _envp: &[String],
    ) -> i32 {
        let mut request = SpawnRequest::new(path).with_args(argv.to_vec());
        if let Some(actions) = file_actions {
            request = request.with_file_actions(actions.clone());
        }
        if let Some(attr) = attributes {
            request = request.with_attributes(*attr);
        }

        match self.spawn(request) {
            Ok(pid) => {
                if let Some(out) = pid_out {
                    *out = pid;
                }
                0
            }
            Err(e) => e.errno().code(),
        }
    }
}

impl Clone for Spawner {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            scheduler: Arc::clone(&self.scheduler),
            fd_table: Arc::clone(&self.fd_table),
            launcher: Arc::clone(&self.launcher),
            symtab: Arc::clone(&self.symtab),
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
