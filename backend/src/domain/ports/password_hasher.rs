//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing or checking passwords.
    pub enum PasswordHashError {
        /// The hashing primitive rejected the input or its parameters.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// CPU-bound password hashing.
///
/// Implementations are synchronous; async callers should move the work off
/// the executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string for `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// True when `password` matches `hashed`. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hashed: &str) -> Result<bool, PasswordHashError>;
}
