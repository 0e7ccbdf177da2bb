//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and response hardening.

pub mod headers;
pub mod trace;

pub use headers::security_headers;
pub use trace::Trace;
