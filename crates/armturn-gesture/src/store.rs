//! Gesture state store - the latest per-window detection result

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cell holding the most recent detection result.
///
/// Clones are handles to the same cell. The value written by a tick stays
/// visible until the next tick overwrites it.
#[derive(Debug, Clone, Default)]
pub struct GestureStateStore {
    detected: Arc<AtomicBool>,
}

impl GestureStateStore {
    /// New store holding `false`
    pub fn new() -> Self {
        GestureStateStore::default()
    }

    /// Publish a detection result
    #[inline]
    pub(crate) fn set(&self, value: bool) {
        self.detected.store(value, Ordering::Release);
    }

    /// Read the latest detection result
    #[inline]
    pub fn get(&self) -> bool {
        self.detected.load(Ordering::Acquire)
    }
}
