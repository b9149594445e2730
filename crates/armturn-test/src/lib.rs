//! ARMTURN Test Harness - Simulated sensors and pipeline validation
//!
//! This crate provides:
//! - A seeded arm simulator producing sensor frames
//! - A deterministic window scenario runner
//! - End-to-end pipeline tests
//! - Concurrency stress tests

pub mod scenario;
pub mod simulator;

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod integration;

pub use scenario::*;
pub use simulator::*;
