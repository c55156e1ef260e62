//! Cooperative interruption for long pipeline runs.
//!
//! A single flag is shared by the Ctrl+C handler, the worker pool (which stops
//! starting new tasks) and the helper invoker (which kills the running child).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared interruption flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a SIGINT (Ctrl+C) handler that sets this flag.
    ///
    /// Only one handler can be installed per process; a second call fails.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let flag = Arc::clone(&self.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
    }

    /// Set the flag.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
