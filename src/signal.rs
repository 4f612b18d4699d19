//! Shared early-exit decision flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// A single shared boolean decision flag with relaxed visibility.
///
/// One flavor per quantifier: the "all" signal starts `true` and is only ever
/// lowered to `false`; the "any" signal starts `false` and is only ever
/// raised to `true`. Within one evaluate call the value moves monotonically
/// in one direction and writes are idempotent, so racing workers need no
/// coordination.
///
/// Reads and writes are `Relaxed`: cross-worker visibility is best-effort
/// and may lag, which only costs redundant work before other workers notice
/// the decision. The flag must never be used to make any other shared memory
/// visible; that guarantee does not exist here.
#[derive(Debug)]
pub struct EarlyExitSignal {
    flag: AtomicBool,
}

impl EarlyExitSignal {
    /// Signal for universal ("all") evaluation; starts `true`.
    pub fn for_all() -> Self {
        Self {
            flag: AtomicBool::new(true),
        }
    }

    /// Signal for existential ("any") evaluation; starts `false`.
    pub fn for_any() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Current value. May lag behind another worker's write.
    pub fn get(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Record the terminal decision. Callers only ever write the value
    /// opposite to the initial one, so repeated writes are harmless.
    pub fn decide(&self, value: bool) {
        self.flag.store(value, Ordering::Relaxed);
    }
}
