//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (N8N_WEBHOOK_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed by value to the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is loaded once; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An absent destination is valid; it surfaces per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_with_env, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RelayConfig, RelayEndpointConfig, TimeoutConfig};
