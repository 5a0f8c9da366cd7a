#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{cookie::Cookie, dev::ServiceResponse, test::TestRequest, web::Data};
use serde_json::json;

use bop_server::{
    auth::{access_token::AccessToken, token_issuing::ACCESS_COOKIE_NAME},
    db::{MemoryStore, Store},
};

pub fn store_data(store: &Arc<MemoryStore>) -> Data<dyn Store> {
    let store: Arc<dyn Store> = store.clone();
    Data::from(store)
}

pub fn register_request(name: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/auth/register").set_json(json!({
        "name": name,
        "email": email,
        "password": password,
    }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/auth/login").set_json(json!({
        "email": email,
        "password": password,
    }))
}

/// The token cookie set by a response, if any.
pub fn token_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == ACCESS_COOKIE_NAME)
        .map(|c| c.into_owned())
}

/// A cookie holding a freshly signed token for `email`, as login would set it.
pub fn auth_cookie(email: &str) -> Cookie<'static> {
    Cookie::new(ACCESS_COOKIE_NAME, AccessToken::new(email.to_owned()).to_string())
}
