//! Shared `PostgreSQL` plumbing: pool construction, blocking helpers, and
//! the Diesel schema for every table.

mod blocking;
mod constraints;
pub mod schema;
mod users;

pub(crate) use blocking::{get_conn_with, run_blocking_with};
pub(crate) use constraints::{
    CHANGE_LOGS_TASK_FKEY, COMMENTS_TASK_FKEY, is_foreign_key_violation, is_unique_violation,
};
pub use users::register_users;
pub(crate) use users::user_name;

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot open its initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}
