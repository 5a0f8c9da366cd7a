use actix_web::{cookie::time, post, web::Json, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{
        routes::build_access_cookie,
        token_issuing::{issue_access_token, IssueAccessTokenResult, ACCESS_TOKEN_VALIDITY},
    },
    db::DB,
    error::{macros::err, HResult, HandlerError},
};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@x.com")]
    pub email: String,
    #[schema(example = "p1")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
}

/// Login
///
/// Check an email and password and hand out an identity token in the
/// `access_token_cookie` HTTP-only cookie, valid for 10 hours. The response
/// does not reveal whether the email or the password was wrong.
#[utoipa::path(
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Login successful, token cookie set", body = LoginResponse),
        (status = BAD_REQUEST, description = "Invalid email or password", body = HandlerError),
        (status = UNPROCESSABLE_ENTITY, description = "Malformed request body", body = HandlerError)
    ),
    tag = "identity"
)]
#[post("/auth/login")]
pub async fn login(db: DB, req: Json<LoginRequest>) -> HResult<HttpResponse> {
    use IssueAccessTokenResult::*;
    match issue_access_token(db.get_ref(), &req.email, &req.password).await? {
        Success { user, access_token } => {
            info!("{} logged in", user.email);

            let cookie = build_access_cookie(&access_token.to_string())
                .max_age(time::Duration::seconds(ACCESS_TOKEN_VALIDITY.num_seconds()))
                .finish();

            Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
                message: "Login successful".into(),
            }))
        }
        Failure => err!(400, "Invalid email or password"),
    }
}
