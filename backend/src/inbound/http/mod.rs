//! HTTP inbound adapter serving the HTML pages.

pub mod error;
pub mod forms;
pub mod render;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod snippets;
pub mod state;
pub mod templates;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
