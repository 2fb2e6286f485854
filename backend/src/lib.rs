//! Multi-tenant pet registry backend.
//!
//! Layers follow a hexagonal layout: [`domain`] holds the rules and the
//! ports, [`inbound`] and [`outbound`] adapt them to HTTP and storage.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
