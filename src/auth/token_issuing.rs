use chrono::Duration;
use lazy_static::lazy_static;
use log::debug;

use crate::{
    auth::{access_token::AccessToken, user::UserView},
    crypto,
    db::{Store, StoreError},
};

/// Name of the cookie the identity token travels in.
pub const ACCESS_COOKIE_NAME: &str = "access_token_cookie";

lazy_static! {
    pub static ref ACCESS_TOKEN_VALIDITY: Duration = Duration::minutes(600);
}

pub enum IssueAccessTokenResult {
    Failure,
    Success {
        user: UserView,
        access_token: AccessToken,
    },
}

/// Checks an email/password pair and issues a token for the user on success.
///
/// Unknown emails and wrong passwords both produce `Failure` so callers
/// cannot tell which one happened.
pub async fn issue_access_token(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> Result<IssueAccessTokenResult, StoreError> {
    let Some(user) = store.find_user_by_email(email).await? else {
        debug!("login attempt for unknown email");
        return Ok(IssueAccessTokenResult::Failure);
    };

    if !crypto::verify(password, &user.password) {
        debug!("login attempt with wrong password for user {}", user.id);
        return Ok(IssueAccessTokenResult::Failure);
    }

    let access_token = AccessToken::new(user.email.clone());

    Ok(IssueAccessTokenResult::Success {
        user: user.into(),
        access_token,
    })
}
