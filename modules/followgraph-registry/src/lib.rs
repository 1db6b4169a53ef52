pub mod error;

pub use error::{RegistryError, Result};

use sqlx::PgPool;
use tracing::debug;

use followgraph_common::TwitterUser;

/// Idempotent persistence of user identities to Postgres.
///
/// Uniqueness is enforced by the `twitter_users` primary key; the insert
/// carries `ON CONFLICT DO NOTHING`, so any number of concurrent or
/// repeated calls for the same identity commit exactly one row.
pub struct UserRegistry {
    pool: PgPool,
}

impl UserRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Register a user. Returns `true` iff this call inserted the row.
    ///
    /// An already-known identity is the expected duplicate-delivery case,
    /// reported as `false` with the store left unchanged. Any other
    /// database fault propagates.
    pub async fn persist(&self, user: &TwitterUser) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO twitter_users (user_id, name, screen_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.screen_name)
        .execute(&self.pool)
        .await?;

        let is_new = result.rows_affected() == 1;
        debug!(user_id = user.id, is_new, "User persisted");
        Ok(is_new)
    }
}
