//! ARMTURN Core - Fundamental types for skeleton gesture detection
//!
//! This crate defines the types shared by every stage of the pipeline:
//! - Joints and their tracking status (JointType, JointSample)
//! - Per-body skeletons and per-tick sensor frames
//! - 3D vectors used for angle math
//! - The four-angle set produced per frame and its byte encoding
//! - The common error type

pub mod angles;
pub mod error;
pub mod joint;
pub mod skeleton;
pub mod vector;

pub use angles::*;
pub use error::*;
pub use joint::*;
pub use skeleton::*;
pub use vector::*;
