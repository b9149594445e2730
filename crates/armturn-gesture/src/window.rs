//! Window aggregation - bucket flags accumulated between ticks
//!
//! The flag set is a single atomic byte. `observe` ORs one bit in;
//! `tick` swaps the whole byte to zero and evaluates the value it took
//! out. Every observe is therefore counted in exactly one window.
//! Ticks are serialized so results are published in window order.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use armturn_core::AngleSet;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{Bucket, BucketBounds, GestureStateStore, BUCKET_COUNT};

const ALL_BUCKETS: u8 = (1 << BUCKET_COUNT) - 1;

/// Bucket flags as read at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WindowSnapshot(u8);

impl WindowSnapshot {
    pub fn from_bits(bits: u8) -> Self {
        WindowSnapshot(bits & ALL_BUCKETS)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, bucket: Bucket) -> bool {
        self.0 & bucket.mask() != 0
    }

    /// All four buckets seen
    pub fn is_complete(&self) -> bool {
        self.0 == ALL_BUCKETS
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl fmt::Display for WindowSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = Bucket::all().map(|bucket| self.contains(bucket));
        write!(f, "{} {} {} {}", a, b, c, d)
    }
}

/// Result of closing a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Flags the closed window ended with
    pub window: WindowSnapshot,
    /// Whether the window saw a full turn
    pub detected: bool,
}

/// Owns the window flags and is the sole writer of the detection result
#[derive(Debug)]
pub struct WindowAggregator {
    flags: AtomicU8,
    bounds: BucketBounds,
    store: GestureStateStore,
    tick_lock: Mutex<()>,
}

impl Default for WindowAggregator {
    fn default() -> Self {
        Self::new(BucketBounds::default())
    }
}

impl WindowAggregator {
    /// Aggregator with empty flags and a store holding `false`
    pub fn new(bounds: BucketBounds) -> Self {
        WindowAggregator {
            flags: AtomicU8::new(0),
            bounds,
            store: GestureStateStore::new(),
            tick_lock: Mutex::new(()),
        }
    }

    pub fn bounds(&self) -> BucketBounds {
        self.bounds
    }

    /// Read handle to the detection result
    pub fn store(&self) -> GestureStateStore {
        self.store.clone()
    }

    /// Record a right-elbow angle. Returns the bucket it fell in, if any.
    pub fn observe(&self, angle: u8) -> Option<Bucket> {
        let bucket = self.bounds.classify(angle)?;
        self.flags.fetch_or(bucket.mask(), Ordering::AcqRel);
        Some(bucket)
    }

    /// Record the gating angle of a full angle set
    pub fn observe_angles(&self, angles: &AngleSet) -> Option<Bucket> {
        self.observe(angles.right_elbow)
    }

    /// Close the current window: evaluate, publish, clear.
    pub fn tick(&self) -> TickOutcome {
        let guard = self.tick_lock.lock();
        let window = WindowSnapshot::from_bits(self.flags.swap(0, Ordering::AcqRel));
        let detected = window.is_complete();
        self.store.set(detected);
        drop(guard);

        if detected {
            info!("Turn detected");
        } else {
            debug!(flags = %window, "Window closed without turn");
        }

        TickOutcome { window, detected }
    }

    /// Discard the open window without evaluating it. The published
    /// result is left untouched.
    pub fn reset(&self) -> WindowSnapshot {
        let _guard = self.tick_lock.lock();
        WindowSnapshot::from_bits(self.flags.swap(0, Ordering::AcqRel))
    }

    /// Current flags of the open window
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot::from_bits(self.flags.load(Ordering::Acquire))
    }
}
