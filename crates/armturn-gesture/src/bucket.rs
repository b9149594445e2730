//! Bucket classification of the right-elbow angle
//!
//! Four half-open ranges partition `[0, upper_edge_of_last)`:
//! `[0, e0)`, `[e0, e1)`, `[e1, e2)`, `[e2, e3)`. Angles at or above the
//! last edge fall in no bucket.

use armturn_core::{ArmturnError, ArmturnResult};

/// Number of buckets a full turn must sweep through
pub const BUCKET_COUNT: usize = 4;

/// Default bucket upper edges, in degrees
pub const DEFAULT_BUCKET_EDGES: [u8; BUCKET_COUNT] = [40, 80, 120, 160];

/// One of the four angle ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Arm almost folded
    First = 0,
    Second = 1,
    Third = 2,
    /// Arm almost straight
    Fourth = 3,
}

impl Bucket {
    /// All buckets in ascending angle order
    pub fn all() -> [Bucket; BUCKET_COUNT] {
        [Bucket::First, Bucket::Second, Bucket::Third, Bucket::Fourth]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask used in window flag sets
    #[inline]
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }

    pub fn from_index(index: usize) -> Option<Bucket> {
        Bucket::all().get(index).copied()
    }
}

/// Upper edges of the four buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketBounds {
    edges: [u8; BUCKET_COUNT],
}

impl Default for BucketBounds {
    fn default() -> Self {
        BucketBounds {
            edges: DEFAULT_BUCKET_EDGES,
        }
    }
}

impl BucketBounds {
    /// Create bounds from four strictly increasing, non-zero upper edges
    pub fn new(edges: [u8; BUCKET_COUNT]) -> ArmturnResult<Self> {
        if edges[0] == 0 {
            return Err(ArmturnError::InvalidBucketBounds(
                "first edge must be above zero".into(),
            ));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ArmturnError::InvalidBucketBounds(format!(
                "edges must be strictly increasing, got {:?}",
                edges
            )));
        }
        Ok(BucketBounds { edges })
    }

    pub fn edges(&self) -> [u8; BUCKET_COUNT] {
        self.edges
    }

    /// Half-open degree range `[low, high)` covered by a bucket
    pub fn range(&self, bucket: Bucket) -> (u8, u8) {
        let i = bucket.index();
        let low = if i == 0 { 0 } else { self.edges[i - 1] };
        (low, self.edges[i])
    }

    /// Classify an angle into its bucket, if any
    pub fn classify(&self, angle: u8) -> Option<Bucket> {
        self.edges
            .iter()
            .position(|&edge| angle < edge)
            .and_then(Bucket::from_index)
    }
}

/// Classify with the default 40/80/120/160 edges
pub fn classify(angle: u8) -> Option<Bucket> {
    BucketBounds::default().classify(angle)
}
