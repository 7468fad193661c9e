/*!
 * Task Spawn Subsystem
 *
 * posix_spawn-style task creation without fork. The classic fork+exec
 * split needs an MMU this system does not have, so descriptor rewiring
 * that must happen "inside" the child is executed by a short-lived proxy
 * task instead, synchronized with the requester through a capacity-one
 * mailbox.
 */

pub mod attrs;
pub mod file_actions;
mod mailbox;
mod proxy;
mod spawner;
mod types;

pub use spawner::Spawner;
pub use types::{FileAction, FileActions, SpawnAttributes, SpawnFlags, SpawnRequest};
