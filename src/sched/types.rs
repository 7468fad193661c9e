/*!
 * Scheduling Types
 */

use serde::{Deserialize, Serialize};

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Round-robin with a fixed time quantum
    RoundRobin,
    /// Run-to-completion FIFO within a priority level
    Fifo,
    /// Sporadic-server scheduling with a replenishment budget
    Sporadic,
}
