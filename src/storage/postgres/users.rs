//! User bootstrap and name lookup for `PostgreSQL` storage.

use super::{PgPool, schema::users};
use crate::identity::UserId;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
struct NewUserRow {
    id: uuid::Uuid,
    name: String,
    created_at: chrono::DateTime<Utc>,
}

/// Ensures a `users` row exists for every identity the server accepts.
///
/// Existing rows keep their name. Returns the number of rows inserted.
///
/// # Errors
///
/// Returns an error when a connection cannot be obtained or the insert
/// fails.
pub fn register_users(
    pool: &PgPool,
    users: &[(UserId, String)],
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let created_at = crate::timestamp::truncate(Utc::now());
    let rows: Vec<NewUserRow> = users
        .iter()
        .map(|(user_id, name)| NewUserRow {
            id: user_id.into_inner(),
            name: name.clone(),
            created_at,
        })
        .collect();

    let mut connection = pool.get()?;
    let inserted = diesel::insert_into(users::table)
        .values(&rows)
        .on_conflict(users::id)
        .do_nothing()
        .execute(&mut connection)?;
    Ok(inserted)
}

/// Looks up the display name of `user_id`.
pub(crate) fn user_name(
    connection: &mut PgConnection,
    user_id: uuid::Uuid,
) -> QueryResult<Option<String>> {
    users::table
        .filter(users::id.eq(user_id))
        .select(users::name)
        .first::<String>(connection)
        .optional()
}
