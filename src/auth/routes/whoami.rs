use actix_web::{get, web::Json};

use crate::{
    auth::{access_token::AccessToken, user::UserView},
    db::DB,
    error::{HResult, HandlerError, IntoHandlerErrorResult},
};

/// Who Am I
///
/// Get the name and email of the user the token cookie belongs to.
#[utoipa::path(
    responses(
        (status = OK, description = "The logged in user", body = UserView),
        (status = UNAUTHORIZED, description = "Missing, invalid or expired token", body = HandlerError),
        (status = NOT_FOUND, description = "The token's user no longer exists", body = HandlerError)
    ),
    tag = "identity",
    security(("token" = []))
)]
#[get("/auth/quemeusou")]
pub async fn whoami(db: DB, token: AccessToken) -> HResult<Json<UserView>> {
    let user = db
        .find_user_by_email(&token.subject)
        .await?
        .or_err_msg(404, "User not found")?;

    Ok(Json(user.into()))
}
