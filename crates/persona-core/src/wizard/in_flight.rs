use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared busy indicator for a long-running wizard call.
///
/// Clones observe the same flag, so a caller can keep one while
/// `generate`/`download` holds the owner mutably borrowed (for example to
/// drive a spinner from another task).
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds a busy flag for the lifetime of one suspended call.
///
/// The flag is set on construction and cleared on drop, so it also clears
/// when the enclosing future is dropped before completion.
pub(crate) struct InFlight(BusyFlag);

impl InFlight {
    pub(crate) fn start(flag: &BusyFlag) -> Self {
        flag.0.store(true, Ordering::Release);
        Self(flag.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::Release);
    }
}
