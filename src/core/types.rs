/*!
 * Core Types
 * Scalar types shared across the spawn subsystem
 */

/// Task identifier
pub type Pid = u32;

/// File descriptor type
pub type Fd = u32;

/// Priority level (0-255, higher is more important)
pub type Priority = u8;

/// open(2)-style flag bits
pub type OFlags = u32;

/// open(2)-style mode bits
pub type Mode = u32;

/// Stack size for the spawn proxy task, in bytes.
///
/// The proxy only replays file actions and calls into the loader, so a
/// small fixed stack is enough.
pub const PROXY_STACK_SIZE: usize = 64 * 1024;
