use actix_web::cookie::{Cookie, CookieBuilder, SameSite};
use utoipa::OpenApi;

use crate::{auth::token_issuing::ACCESS_COOKIE_NAME, options::COOKIE_SECURE};

pub mod login;
pub mod logout;
pub mod register;
pub mod whoami;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(login::login)
        .service(logout::logout)
        .service(register::register)
        .service(whoami::whoami);
}

pub(crate) fn build_access_cookie(token: &str) -> CookieBuilder<'static> {
    Cookie::build(ACCESS_COOKIE_NAME, token.to_owned())
        // only allow https, unless running in development
        .secure(*COOKIE_SECURE)
        // disallow js access
        .http_only(true)
        // send on all api calls
        .path("/")
        // allow cookie to be sent on anywhere on the same domain, even if the user is coming from another site
        .same_site(SameSite::Lax)
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "identity", description = "Registration, login and logout of users")
    ),
    paths(
        register::register,
        login::login,
        whoami::whoami,
        logout::logout,
    ),
    components(schemas(
        crate::auth::user::UserView,
        crate::error::HandlerError,
        register::RegisterRequest,
        login::LoginRequest,
        login::LoginResponse,
        logout::LogoutResponse,
    ))
)]
pub struct AuthApiDocs;
