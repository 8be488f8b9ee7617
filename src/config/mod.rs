//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ETH_PROVIDER_URL / CLI flags (overrides)
//!     → validation.rs (semantic checks)
//!     → DemoConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the client runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_env_overrides, load_config, CliOverrides, ConfigError};
pub use schema::{BlockchainConfig, DemoConfig, ObservabilityConfig, WalkthroughConfig};
