//! ARMTURN Gesture - Arm-turn detection from skeleton angles
//!
//! Pipeline stages, leaves first:
//! - Angle calculation: skeleton → four upper-body angles
//! - Bucket classification: right-elbow angle → one of four ranges
//! - Window aggregation: bucket flags accumulated between timer ticks
//! - Gesture state store: latest per-window detection result
//! - Query responder: text command → detection result reply
//!
//! A turn is detected when the right elbow sweeps through all four
//! buckets within one window.

pub mod angle;
pub mod bucket;
pub mod query;
pub mod store;
pub mod window;

pub use angle::*;
pub use bucket::*;
pub use query::*;
pub use store::*;
pub use window::*;
