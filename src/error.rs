use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    web::{JsonConfig, QueryConfig},
    HttpRequest, HttpResponse, ResponseError,
};
use derive_more::{Display, Error};
use log::{error, warn};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{access_token::AccessTokenParseError, token::TokenParseError},
    db::StoreError,
    security::InvalidInput,
};

pub type HResult<T> = std::result::Result<T, HandlerError>;

/// Every failed request is answered with one of these, serialized as JSON.
#[derive(Debug, Display, Error, Serialize, ToSchema)]
#[display(fmt = "{}", message)]
pub struct HandlerError {
    #[schema(example = "BOP not found")]
    pub message: String,
    #[schema(example = 404)]
    pub code: u16,
}

impl HandlerError {
    pub fn with_code(code: u16, message: String) -> Self {
        Self { message, code }
    }

    pub fn internal_error() -> Self {
        Self::with_code(500, "Internal Server Error".into())
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            // writes that can conflict match on it themselves, reads never do
            StoreError::Conflict => {
                error!("unhandled store conflict");
                Self::internal_error()
            }
            StoreError::Backend(e) => {
                error!("database error: {}", e);
                Self::internal_error()
            }
        }
    }
}

impl From<(u16, &'static str)> for HandlerError {
    fn from(tuple: (u16, &'static str)) -> Self {
        Self::with_code(tuple.0, tuple.1.into())
    }
}

impl From<TokenParseError> for HandlerError {
    fn from(err: TokenParseError) -> Self {
        use TokenParseError::*;
        match err {
            InvalidFormat => Self::with_code(401, "Invalid token supplied.".into()),
            Expired => Self::with_code(401, "The supplied token has expired.".into()),
        }
    }
}

impl From<AccessTokenParseError> for HandlerError {
    fn from(err: AccessTokenParseError) -> Self {
        match err {
            AccessTokenParseError::SignatureInvalid => {
                Self::with_code(401, "Invalid token supplied.".into())
            }
            AccessTokenParseError::TokenInvalid(e) => e.into(),
        }
    }
}

impl From<InvalidInput> for HandlerError {
    fn from(err: InvalidInput) -> Self {
        Self::with_code(422, err.to_string())
    }
}

pub trait IntoHandlerErrorResult<T> {
    fn or_err_msg(self, code: u16, message: &'static str) -> Result<T, HandlerError>;
}

impl<T, E> IntoHandlerErrorResult<T> for Result<T, E> {
    fn or_err_msg(self, code: u16, message: &'static str) -> Result<T, HandlerError> {
        self.map_err(|_| HandlerError::from((code, message)))
    }
}

impl<T> IntoHandlerErrorResult<T> for Option<T> {
    fn or_err_msg(self, code: u16, message: &'static str) -> Result<T, HandlerError> {
        self.ok_or_else(|| HandlerError::from((code, message)))
    }
}

/// Rejects malformed JSON bodies and query strings before a handler runs,
/// using the same error shape as the handlers themselves.
pub fn configure_extractors(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(json_error))
        .app_data(QueryConfig::default().error_handler(query_error));
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("rejected body for {}: {}", req.path(), err);
    HandlerError::with_code(422, format!("Malformed request body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("rejected query for {}: {}", req.path(), err);
    HandlerError::with_code(422, format!("Malformed query: {}", err)).into()
}

pub mod macros {
macro_rules! err {
    ($code:expr, $msg:expr) => {
        Err(crate::error::HandlerError::from(($code, $msg)))
    };
}

    pub(crate) use err;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_surface_as_internal_errors() {
        let err = HandlerError::from(StoreError::Conflict);
        assert_eq!(err.code, 500);

        let err = HandlerError::from(StoreError::Backend(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code, 500);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[test]
    fn lookups_pass_values_through() {
        assert_eq!(Some(3).or_err_msg(404, "BOP not found").unwrap(), 3);

        let err = None::<i32>.or_err_msg(404, "BOP not found").unwrap_err();
        assert_eq!((err.code, err.message.as_str()), (404, "BOP not found"));

        let err = Err::<i32, ()>(()).or_err_msg(401, "Missing access token cookie").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
