/*!
 * File-Action Replay
 * Ordered replay of descriptor mutations in the proxy task
 */

use super::types::{FileAction, FileActions};
use crate::core::errors::{Errno, SpawnError, SpawnResult};
use crate::fd::FdTable;
use log::debug;

/// Replay `actions` in insertion order against `table`.
///
/// Stops at the first failing action, leaving the remainder unexecuted.
/// An empty list succeeds. Close failures never abort the sequence.
pub fn replay(table: &dyn FdTable, actions: &FileActions) -> SpawnResult<()> {
    for (index, action) in actions.iter().enumerate() {
        apply(table, action).map_err(|source| SpawnError::FileAction { index, source })?;
    }
    Ok(())
}

fn apply(table: &dyn FdTable, action: &FileAction) -> Result<(), Errno> {
    match action {
        FileAction::Close { fd } => {
            // Best-effort: closing an already-closed descriptor is fine.
            if let Err(e) = table.close(*fd) {
                debug!("Ignoring close({}) failure during replay: {}", fd, e);
            }
            Ok(())
        }
        FileAction::Dup2 { from, to } => table.dup2(*from, *to),
        FileAction::Open {
            path,
            flags,
            mode,
            fd,
        } => {
            let opened = table.open(path, *flags, *mode)?;
            if opened == *fd {
                return Ok(());
            }
            // Move the descriptor to the requested slot. The intermediate
            // descriptor is closed whether or not the dup succeeds.
            let moved = table.dup2(opened, *fd);
            let _ = table.close(opened);
            moved
        }
    }
}
