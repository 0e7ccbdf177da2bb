//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! Sizing is checked before bb8 sees it: a zero `max_size` becomes a
//! [`PoolError`] instead of a builder panic, and `min_idle` is clamped to
//! `max_size`.

use std::fmt;
use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

type Manager = AsyncDieselConnectionManager<AsyncPgConnection>;

/// Pool lifecycle step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStage {
    Build,
    Checkout,
}

impl fmt::Display for PoolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Build => "build connection pool",
            Self::Checkout => "check out pooled connection",
        })
    }
}

/// Pool failure tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to {stage}: {message}")]
pub struct PoolError {
    stage: PoolStage,
    message: String,
}

impl PoolError {
    pub fn build(message: impl Into<String>) -> Self {
        Self {
            stage: PoolStage::Build,
            message: message.into(),
        }
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        Self {
            stage: PoolStage::Checkout,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> PoolStage {
        self.stage
    }

    /// Underlying cause without the stage prefix.
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Where to connect and how many connections to hold.
///
/// ```
/// use std::time::Duration;
/// use snippetbox::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://web@localhost/snippetbox")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "postgres://web@localhost/snippetbox");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub const DEFAULT_MAX_SIZE: u32 = 10;
    pub const DEFAULT_MIN_IDLE: u32 = 2;
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(Self::DEFAULT_MIN_IDLE),
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    pub fn with_max_size(self, max_size: u32) -> Self {
        Self { max_size, ..self }
    }

    /// Connections opened eagerly and kept warm. `None` opens lazily.
    pub fn with_min_idle(self, min_idle: Option<u32>) -> Self {
        Self { min_idle, ..self }
    }

    /// Upper bound on waiting for a free connection.
    pub fn with_connection_timeout(self, connection_timeout: Duration) -> Self {
        Self {
            connection_timeout,
            ..self
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// `min_idle` as handed to bb8, never above `max_size`.
    fn effective_min_idle(&self) -> Option<u32> {
        self.min_idle.map(|idle| idle.min(self.max_size))
    }

    /// `(max_size, min_idle)` accepted by bb8.
    fn checked_sizes(&self) -> Result<(u32, Option<u32>), PoolError> {
        if self.max_size == 0 {
            return Err(PoolError::build("max_size must be at least 1"));
        }
        Ok((self.max_size, self.effective_min_idle()))
    }
}

/// Cloneable handle shared by every Diesel repository.
#[derive(Clone)]
pub struct DbPool(Pool<AsyncPgConnection>);

impl DbPool {
    /// Opens the pool, establishing the idle connections before returning.
    ///
    /// # Errors
    ///
    /// A build-stage [`PoolError`] for bad sizing, a malformed URL or an
    /// unreachable server.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let (max_size, min_idle) = config.checked_sizes()?;
        let manager = Manager::new(config.database_url());
        let pool = Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self(pool))
    }

    /// # Errors
    ///
    /// A checkout-stage [`PoolError`] when nothing frees up within the
    /// connection timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.0
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
