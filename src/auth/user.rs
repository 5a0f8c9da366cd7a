use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type UserId = i32;

/// A row of the `users` table.
/// Holds the password hash, never serialize this to a client, use [`UserView`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A user about to be inserted, `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// What a client gets to see about a user.
/// Returned by registration and the /auth/quemeusou endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "ana@x.com")]
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}
