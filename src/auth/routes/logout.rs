use actix_web::{post, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::routes::build_access_cookie;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = true)]
    pub logout: bool,
}

/// Logout
///
/// Clear the token cookie. Tokens are not tracked server side, so a copy of
/// the token kept elsewhere stays valid until it expires.
#[utoipa::path(
    responses(
        (status = OK, description = "Cookie cleared", body = LogoutResponse)
    ),
    tag = "identity"
)]
#[post("/auth/logout")]
pub async fn logout() -> HttpResponse {
    let mut death_cookie = build_access_cookie("").finish();
    death_cookie.make_removal();

    HttpResponse::Ok()
        .cookie(death_cookie)
        .json(LogoutResponse { logout: true })
}
