use actix_web::web::Data;
use async_trait::async_trait;
use derive_more::{Display, Error};

use crate::auth::user::{NewUser, User};
use crate::valves::valve::{Bop, BopId, Valve};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Handle to the store as extracted by handlers.
pub type DB = Data<dyn Store>;

/// Postgres SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// a unique constraint (e.g. the user's email) rejected the write
    #[display(fmt = "unique constraint violated")]
    Conflict,
    #[display(fmt = "{}", _0)]
    Backend(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict;
            }
        }

        StoreError::Backend(err)
    }
}

/// Everything the handlers need from persistence.
///
/// Each call is its own unit of work: it takes a connection for the duration
/// of the call and writes are committed before returning, or rolled back on
/// failure.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user, failing with [`StoreError::Conflict`] if the email is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_bop(&self, id: BopId) -> Result<Option<Bop>, StoreError>;

    async fn list_valves_of_bop(&self, bop_id: BopId) -> Result<Vec<Valve>, StoreError>;

    /// Distinct valve acronyms across every BOP, sorted.
    async fn list_valve_acronyms(&self) -> Result<Vec<String>, StoreError>;
}
