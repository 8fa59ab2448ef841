//! Coordinator for graceful shutdown
//!
//! The Coordinator mediates the end of a program's life via two primitives:
//! - **Register:** append a cleanup action to the ordered drain list
//! - **Drain:** run every action sequentially against a bounded grace period
//!
//! Drain is internal; it fires exactly once, triggered by the cancellation
//! token the coordinator was constructed with.

mod config;
mod core;
mod error;

pub use config::CoordinatorConfig;
pub use core::{CleanupAction, Coordinator};
pub use error::DrainError;
