//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters for accounts, RPC calls, transfers)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Private keys never appear in log fields
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
