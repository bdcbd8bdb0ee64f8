//! Webhook relay subsystem.
//!
//! # Data Flow
//! ```text
//! raw body bytes
//!     → payload.rs (JSON parse, routePreference check)
//!     → routing::RouteTable (destination lookup)
//!     → forwarder.rs (single POST, no retries, no-store)
//!     → router.rs (normalize status/body into Delivery or RelayError)
//!     → http::response (uniform envelope)
//! ```
//!
//! # Design Decisions
//! - Stateless: every invocation is independent
//! - Misconfiguration is detected before any network call
//! - The forwarder is a trait so tests can count outbound calls

pub mod error;
pub mod forwarder;
pub mod payload;
pub mod router;

pub use error::RelayError;
pub use forwarder::{ForwardError, Forwarder, HttpForwarder, UpstreamResponse};
pub use payload::InboundPayload;
pub use router::{Delivery, PayloadRouter, RelayResult, MAX_DETAILS_CHARS};
