//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     [destinations] table + N8N_WEBHOOK_* env
//!     → RouteTable::from_config (parse URLs, drop empty entries)
//!     → Freeze as immutable RouteTable (shared via Arc)
//!
//! Per request:
//!     routePreference (closed enum)
//!     → table.rs (total lookup)
//!     → Return: destination Url or None (misconfigured)
//! ```
//!
//! # Design Decisions
//! - Route keys are a closed enum, never free-form strings
//! - Table is immutable at runtime (thread-safe without locks)
//! - A missing destination is not a startup failure

pub mod preference;
pub mod table;

pub use preference::RoutePreference;
pub use table::{RouteTable, RouteTableError};
