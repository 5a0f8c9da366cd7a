use actix_web::{post, web::Json};
use log::{info, warn};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::user::{NewUser, UserView},
    crypto,
    db::{StoreError, DB},
    error::{macros::err, HResult, HandlerError},
    security,
};

const REGISTRATION_FAILED: &str = "Could not save the new user";

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// The display name of the user
    #[schema(example = "Ana")]
    pub name: String,
    /// The email address of the user, must not be registered yet
    #[schema(example = "ana@x.com")]
    pub email: String,
    /// The password of the user
    #[schema(example = "p1")]
    pub password: String,
}

/// Register
///
/// Register a new user account using a name, email address and password.
/// Does not log the user in automatically, please use the login endpoint for that
#[utoipa::path(
    request_body = RegisterRequest,
    responses(
        (status = OK, description = "Registration successful", body = UserView),
        (status = CONFLICT, description = "User with that email already exists", body = HandlerError),
        (status = BAD_REQUEST, description = "The user could not be saved", body = HandlerError),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid or malformed details", body = HandlerError)
    ),
    tag = "identity"
)]
#[post("/auth/register")]
pub async fn register(db: DB, req: Json<RegisterRequest>) -> HResult<Json<UserView>> {
    security::validate_registration(&req.name, &req.email, &req.password)?;

    let password = crypto::hash(&req.password).map_err(|e| {
        warn!("Failed to hash password: {}", e);
        HandlerError::from((400, REGISTRATION_FAILED))
    })?;

    let new_user = NewUser {
        name: req.name.to_owned(),
        email: req.email.to_owned(),
        password,
    };

    match db.create_user(&new_user).await {
        Ok(user) => {
            info!("Registered user {}", user.id);
            Ok(Json(user.into()))
        }
        Err(StoreError::Conflict) => err!(409, "A user with this email is already registered"),
        Err(e) => {
            warn!("Failed to create user: {}", e);
            err!(400, REGISTRATION_FAILED)
        }
    }
}
