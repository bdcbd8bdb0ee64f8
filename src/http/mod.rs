//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID minted or kept)
//!     → relay::PayloadRouter (validate, resolve, forward)
//!     → response.rs (envelope, no-store)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::{envelope_response, FailureEnvelope, SuccessEnvelope};
pub use server::{build_router, AppState, HttpServer, ServerError};
