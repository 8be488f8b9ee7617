//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → subscribers stop waiting on outstanding async results
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
