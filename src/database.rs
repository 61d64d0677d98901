//! `PostgreSQL` connection pooling shared by the persistence adapters.

use crate::settings::DatabaseSettings;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from settings.
///
/// # Errors
///
/// Returns [`PoolError`] if the pool cannot open its initial connections.
pub fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_connections)
        .build(manager)
}
