use async_trait::async_trait;
use log::warn;
use sqlx::{Pool, Postgres};

use super::{Store, StoreError};
use crate::auth::user::{NewUser, User};
use crate::valves::valve::{Bop, BopId, Valve};

/// [`Store`] backed by a Postgres connection pool.
pub struct PgStore {
    pub pool: Pool<Postgres>,
}

impl PgStore {
    pub fn with_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, User>(
            r#"
                INSERT INTO users (name, email, password)
                VALUES ($1, $2, $3)
                RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&mut tx)
        .await;

        match inserted {
            Ok(created) => {
                tx.commit().await?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("failed to roll back user insert: {}", rollback_err);
                }
                Err(e.into())
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_bop(&self, id: BopId) -> Result<Option<Bop>, StoreError> {
        let bop = sqlx::query_as::<_, Bop>("SELECT id, name FROM bops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bop)
    }

    async fn list_valves_of_bop(&self, bop_id: BopId) -> Result<Vec<Valve>, StoreError> {
        let valves = sqlx::query_as::<_, Valve>(
            "SELECT id, acronym, bop_id FROM valves WHERE bop_id = $1 ORDER BY id",
        )
        .bind(bop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(valves)
    }

    async fn list_valve_acronyms(&self) -> Result<Vec<String>, StoreError> {
        let acronyms = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT acronym FROM valves ORDER BY acronym",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(acronyms)
    }
}
