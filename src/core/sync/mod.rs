/*!
 * Synchronization Primitives
 * Condvar-backed counting semaphore used by the spawn mailbox
 */

mod semaphore;

pub use semaphore::Semaphore;
