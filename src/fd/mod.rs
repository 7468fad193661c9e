/*!
 * File Descriptor Interface
 * Trait seam toward the task file descriptor table
 */

use crate::core::errors::Errno;
use crate::core::types::{Fd, Mode, OFlags};

/// Open for reading only
pub const O_RDONLY: OFlags = 0x0000;
/// Open for writing only
pub const O_WRONLY: OFlags = 0x0001;
/// Open for reading and writing
pub const O_RDWR: OFlags = 0x0002;
/// Create the file if it does not exist
pub const O_CREAT: OFlags = 0x0040;
/// Truncate to zero length on open
pub const O_TRUNC: OFlags = 0x0200;
/// Append on each write
pub const O_APPEND: OFlags = 0x0400;

/// Descriptor-table operations consumed by the file-action replayer.
///
/// All tasks share one address space; the table seen here is the calling
/// task's view, which a newly spawned task inherits. During an indirect
/// spawn the caller is the proxy task, so mutations land exactly where the
/// child will pick them up.
#[cfg_attr(test, mockall::automock)]
pub trait FdTable: Send + Sync {
    /// Open `path`, returning the lowest free descriptor.
    fn open(&self, path: &str, flags: OFlags, mode: Mode) -> Result<Fd, Errno>;

    /// Close a descriptor.
    fn close(&self, fd: Fd) -> Result<(), Errno>;

    /// Duplicate `from` onto `to`, closing `to` first if it is open.
    fn dup2(&self, from: Fd, to: Fd) -> Result<(), Errno>;
}
