//! Infrastructure layer providing process-level integrations.
//!
//! This module contains command-line configuration and the log sink; the
//! workout data itself never leaves memory.

pub mod config;
pub mod logging;

pub use config::*;
pub use logging::*;
