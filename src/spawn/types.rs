/*!
 * Spawn Types
 * Request, file-action, and attribute payloads for the spawn surface
 */

use crate::core::types::{Fd, Mode, OFlags, Priority};
use crate::sched::SchedulingPolicy;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One descriptor-table mutation applied before the new task runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileAction {
    /// Close `fd`. Failure is ignored during replay.
    Close { fd: Fd },
    /// Duplicate `from` onto `to`.
    Dup2 { from: Fd, to: Fd },
    /// Open `path` and place the result at descriptor `fd`.
    Open {
        path: String,
        flags: OFlags,
        mode: Mode,
        fd: Fd,
    },
}

/// Ordered file-action list.
///
/// Insertion order is execution order. The list is append-only; replay
/// never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileActions {
    actions: Vec<FileAction>,
}

impl FileActions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append a close action.
    pub fn add_close(&mut self, fd: Fd) {
        self.actions.push(FileAction::Close { fd });
    }

    /// Append a dup2 action.
    pub fn add_dup2(&mut self, from: Fd, to: Fd) {
        self.actions.push(FileAction::Dup2 { from, to });
    }

    /// Append an open action targeting descriptor `fd`.
    pub fn add_open(&mut self, path: impl Into<String>, flags: OFlags, mode: Mode, fd: Fd) {
        self.actions.push(FileAction::Open {
            path: path.into(),
            flags,
            mode,
            fd,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileAction> {
        self.actions.iter()
    }
}

impl<'a> IntoIterator for &'a FileActions {
    type Item = &'a FileAction;
    type IntoIter = std::slice::Iter<'a, FileAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

bitflags! {
    /// Attribute-validity flags.
    ///
    /// Only the scheduling flags are honored. Foreign bits may arrive
    /// through the compat surface and are accepted but inert.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpawnFlags: u32 {
        /// The attribute priority is meaningful.
        const SETSCHEDPARAM = 0x01;
        /// The attribute policy is meaningful.
        const SETSCHEDULER = 0x02;
    }
}

impl Serialize for SpawnFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for SpawnFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(SpawnFlags::from_bits_truncate(u32::deserialize(
            deserializer,
        )?))
    }
}

/// Scheduling overrides requested for the new task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpawnAttributes {
    pub flags: SpawnFlags,
    pub priority: Priority,
    pub policy: SchedulingPolicy,
}

impl SpawnAttributes {
    /// Default attributes: no overrides requested.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: SpawnFlags::empty(),
            priority: 0,
            policy: SchedulingPolicy::RoundRobin,
        }
    }

    /// Request an explicit priority for the new task.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self.flags |= SpawnFlags::SETSCHEDPARAM;
        self
    }

    /// Request a scheduling policy for the new task.
    #[must_use]
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self.flags |= SpawnFlags::SETSCHEDULER;
        self
    }

    /// Accept a raw flag word from the compat surface. Bits this system
    /// does not recognize are dropped.
    #[must_use]
    pub fn with_raw_flags(mut self, raw: u32) -> Self {
        self.flags = SpawnFlags::from_bits_truncate(raw);
        self
    }
}

impl Default for SpawnAttributes {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of one spawn call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpawnRequest {
    pub path: String,
    pub argv: Vec<String>,
    pub file_actions: FileActions,
    pub attributes: Option<SpawnAttributes>,
}

impl SpawnRequest {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            argv: vec![],
            file_actions: FileActions::new(),
            attributes: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, argv: Vec<String>) -> Self {
        self.argv = argv;
        self
    }

    #[must_use]
    pub fn with_file_actions(mut self, file_actions: FileActions) -> Self {
        self.file_actions = file_actions;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: SpawnAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}
