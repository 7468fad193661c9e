/*!
 * Core Primitives
 * Shared scalar types, error taxonomy, and synchronization
 */

pub mod errors;
pub mod sync;
pub mod types;
