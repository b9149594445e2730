//! ARMTURN Runtime - Pipeline orchestration
//!
//! Three actors share one pipeline:
//! 1. Frame handler: sensor frames → angles → window flags
//! 2. Window timer: closes the window every period and publishes the result
//! 3. Query path: reads the published result for the messaging bridge
//!
//! This crate owns the lifecycle (start/stop), the timer task, the frame
//! pump, configuration loading and logging setup.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod source;

pub use config::*;
pub use logging::*;
pub use pipeline::*;
pub use source::*;
