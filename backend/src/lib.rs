//! Subscriber API library modules.
//!
//! The binary in `main.rs` wires these together; integration tests build
//! their own apps from the same pieces.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
