//! Snippet sharing web service.
//!
//! Layout follows ports and adapters: `domain` holds the model and port
//! traits, `inbound::http` serves HTML pages, `outbound` implements the ports
//! against PostgreSQL, memory and Argon2.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
