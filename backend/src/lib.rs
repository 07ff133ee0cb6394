//! Blog backend library.
//!
//! Hexagonal layout: `domain` holds entities, ports and services; `inbound`
//! adapts HTTP requests onto the driving ports; `outbound` implements the
//! driven ports over PostgreSQL, memory and credential primitives.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
