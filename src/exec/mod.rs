/*!
 * Executable Loading Interface
 * Trait seams toward the binary loader and the raw task-creation primitive
 */

mod thread;

pub use thread::ThreadLauncher;

use crate::core::errors::Errno;
use crate::core::types::{Pid, Priority};
use std::collections::HashMap;

/// Entry body for a raw task.
pub type TaskEntry = Box<dyn FnOnce() + Send + 'static>;

/// Exported symbols made visible to loaded executables.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, usize>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Register an exported symbol.
    pub fn insert(&mut self, name: impl Into<String>, address: usize) {
        self.symbols.insert(name.into(), address);
    }

    /// Look up an exported symbol address.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.symbols.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Binary loader: maps an executable image and starts it as a new task.
#[cfg_attr(test, mockall::automock)]
pub trait Loader: Send + Sync {
    /// Create a task from the executable at `path`.
    ///
    /// When the caller holds the preemption lock, the new task does not run
    /// until that lock is released.
    fn exec(&self, path: &str, argv: &[String], symtab: &SymbolTable) -> Result<Pid, Errno>;
}

/// Raw task-creation primitive, used to start the spawn proxy itself.
#[cfg_attr(test, mockall::automock)]
pub trait TaskLauncher: Send + Sync {
    /// Start a task running `entry` at the given priority.
    fn create_task(
        &self,
        name: &str,
        priority: Priority,
        stack_size: usize,
        entry: TaskEntry,
    ) -> Result<Pid, Errno>;
}
