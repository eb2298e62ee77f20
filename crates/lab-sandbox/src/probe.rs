//! Open/release accounting for ephemeral databases.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts ephemeral databases opened and released.
///
/// Shared through `Arc` between the request dispatcher and every sandbox run.
/// `live()` must return to zero once all in-flight requests have finished.
#[derive(Debug, Default)]
pub struct SandboxProbe {
    opened: AtomicU64,
    released: AtomicU64,
}

impl SandboxProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total databases successfully opened.
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::Acquire)
    }

    /// Total databases released.
    #[must_use]
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Acquire)
    }

    /// Databases opened but not yet released.
    #[must_use]
    pub fn live(&self) -> u64 {
        // Read `released` first so a concurrent release cannot make it exceed `opened`.
        let released = self.released();
        self.opened().saturating_sub(released)
    }

    pub(crate) fn record_open(&self) {
        self.opened.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn record_release(&self) {
        self.released.fetch_add(1, Ordering::AcqRel);
    }
}
