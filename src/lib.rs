//! Offramp - graceful-shutdown coordinator
//!
//! Offramp collects cleanup actions registered over a program's lifetime and,
//! when a cancellation signal fires, runs all of them in registration order
//! against a bounded grace period. Failures are reported through a
//! caller-supplied error sink; nothing is retried and an in-progress drain is
//! never cancelled.
//!
//! # Core Concepts
//!
//! - **Register Anywhere**: any task can add a cleanup action at any time
//! - **Drain Once**: the cancellation signal triggers exactly one drain
//! - **Bounded Wait**: the grace period caps total drain time, not each action
//! - **Best Effort**: on timeout the drain is abandoned, never force-killed
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use offramp::Coordinator;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cancel = CancellationToken::new();
//! let coordinator = Coordinator::new(
//!     cancel.clone(),
//!     |err| eprintln!("cleanup error: {err}"),
//!     Duration::from_secs(5),
//! );
//!
//! coordinator
//!     .register(|_shutdown| async move {
//!         // flush buffers, close connections, ...
//!         Ok(())
//!     })
//!     .await;
//!
//! // Later, on SIGTERM or equivalent:
//! cancel.cancel();
//! # }
//! ```
//!
//! # Modules
//!
//! - [`coordinator`] - the coordinator itself: registration and the drain race

pub mod coordinator;

// Re-export commonly used types
pub use coordinator::{CleanupAction, Coordinator, CoordinatorConfig, DrainError};
