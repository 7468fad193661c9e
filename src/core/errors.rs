/*!
 * Error Types
 * POSIX error numbers and the spawn error taxonomy
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// POSIX-style error numbers carried across the collaborator traits.
///
/// Discriminants match the conventional errno values so `code()` can be
/// handed back unchanged through the compat entry point.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Errno {
    #[error("no such file or directory")]
    NoEnt = 2,

    #[error("no such task")]
    Srch = 3,

    #[error("interrupted wait")]
    Intr = 4,

    #[error("i/o error")]
    Io = 5,

    #[error("executable format error")]
    NoExec = 8,

    #[error("bad file descriptor")]
    BadF = 9,

    #[error("resource temporarily unavailable")]
    Again = 11,

    #[error("out of memory")]
    NoMem = 12,

    #[error("permission denied")]
    Acces = 13,

    #[error("invalid argument")]
    Inval = 22,

    #[error("too many open files")]
    MFile = 24,

    #[error("function not implemented")]
    NoSys = 38,
}

impl Errno {
    /// Raw errno value for the POSIX-compat surface.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Spawn operation result
///
/// # Must Use
/// Spawn failures leave no task behind and must be handled
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Spawn errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SpawnError {
    #[error("empty executable path")]
    EmptyPath,

    #[error("file action {index} failed: {source}")]
    FileAction {
        index: usize,
        #[source]
        source: Errno,
    },

    #[error("executable load failed: {0}")]
    ExecFailed(Errno),

    #[error("proxy task creation failed: {0}")]
    ProxyFailed(Errno),

    #[error("spawn proxy exited without a result")]
    Incomplete,
}

impl SpawnError {
    /// Map to the POSIX error number returned by `posix_spawn`.
    #[must_use]
    pub const fn errno(&self) -> Errno {
        match self {
            SpawnError::EmptyPath => Errno::Inval,
            SpawnError::FileAction { source, .. } => *source,
            SpawnError::ExecFailed(e) | SpawnError::ProxyFailed(e) => *e,
            SpawnError::Incomplete => Errno::NoSys,
        }
    }
}
