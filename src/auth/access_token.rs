use std::future::{ready, Ready};
use std::ops::Deref;
use std::str::FromStr;

use actix_web::FromRequest;
use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use log::debug;

use crate::error::{HResult, HandlerError, IntoHandlerErrorResult};
use crate::{crypto, options::TOKEN_SIGNING_KEY};

use super::token::{Token, TokenParseError};
use super::token_issuing::{ACCESS_COOKIE_NAME, ACCESS_TOKEN_VALIDITY};

/// A signed identity token.
///
/// ```text
///    YW5hQHguY29t.ZFZDYw.iIuDsgiT4s2ehQ-3ATImimyPUoooTPC1ytqqQuPQSJU
///
///    AAAAAAAAAAAA.BBBBBB.CCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC
///    ~~~~~~~~~~~~ ~~~~~~ ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
///      subject    expiry                 signature
/// ```
///
/// Where `subject` = `BASE64URL(email)`,
/// `expiry` = `BASE64URL(unix_timestamp.big_endian_bytes)`
/// and `signature` = `BASE64URL(HMACSHA256_SIGN(subject + "." + expiry, TOKEN_SIGNING_KEY))`
///
/// Display serializes the signed token, FromStr parses it and verifies both
/// expiry and signature.
///
/// As a request extractor it reads the token from the `access_token_cookie`
/// cookie and rejects the request with 401 before the handler runs when the
/// cookie is missing, malformed, expired or badly signed.
#[derive(Debug, PartialEq, Eq, Display)]
pub struct AccessToken(Token);

impl AccessToken {
    pub fn from_existing(token: Token) -> Option<Self> {
        let access_token = AccessToken(token);

        if access_token.is_signature_valid() {
            Some(access_token)
        } else {
            None
        }
    }

    pub fn new(subject: String) -> Self {
        let expires = Utc::now() + *ACCESS_TOKEN_VALIDITY;
        Self::with_expiry(subject, expires)
    }

    pub fn with_expiry(subject: String, expires: DateTime<Utc>) -> Self {
        let mut token = Token::new(subject, expires, String::new());

        // signs the payload and attaches the signature
        let signature = crypto::sign(&TOKEN_SIGNING_KEY, token.payload().as_bytes());
        token.proof = base64_url::encode(&signature);
        AccessToken(token)
    }

    pub fn is_signature_valid(&self) -> bool {
        let signature = match base64_url::decode(&self.proof) {
            Ok(v) => v,
            Err(_) => return false,
        };

        crypto::verify_signature(&TOKEN_SIGNING_KEY, self.payload().as_bytes(), &signature)
    }
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum AccessTokenParseError {
    SignatureInvalid,
    TokenInvalid(TokenParseError),
}

impl FromStr for AccessToken {
    type Err = AccessTokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = Token::from_str(s).map_err(AccessTokenParseError::TokenInvalid)?;
        AccessToken::from_existing(token).ok_or(AccessTokenParseError::SignatureInvalid)
    }
}

impl Deref for AccessToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AccessToken {
    type Error = HandlerError;
    type Future = Ready<HResult<Self>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let result = req
            .cookie(ACCESS_COOKIE_NAME)
            .or_err_msg(401, "Missing access token cookie")
            .and_then(|cookie| {
                cookie.value().parse::<AccessToken>().map_err(|e| {
                    debug!("rejected access token for {}: {}", req.path(), e);
                    HandlerError::from(e)
                })
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn signed_token_round_trips() {
        let token = AccessToken::new("ana@x.com".into());
        let parsed: AccessToken = token.to_string().parse().unwrap();

        assert_eq!(parsed.subject, "ana@x.com");
        assert_eq!(parsed.expires.timestamp(), token.expires.timestamp());
    }

    #[test]
    fn expires_after_ten_hours() {
        let token = AccessToken::new("ana@x.com".into());
        let remaining = token.expires - Utc::now();

        assert!(remaining > Duration::minutes(599));
        assert!(remaining <= Duration::minutes(600));
    }

    #[test]
    fn tampered_subject_is_rejected() {
        let token = AccessToken::new("ana@x.com".into()).to_string();
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", base64_url::encode("admin@x.com"), rest);

        assert_eq!(
            forged.parse::<AccessToken>(),
            Err(AccessTokenParseError::SignatureInvalid)
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = AccessToken::new("ana@x.com".into()).to_string();
        let (payload, _) = token.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", payload, base64_url::encode(&[0u8; 32]));

        assert_eq!(
            forged.parse::<AccessToken>(),
            Err(AccessTokenParseError::SignatureInvalid)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = AccessToken::with_expiry("ana@x.com".into(), Utc::now() - Duration::hours(1));

        assert_eq!(
            token.to_string().parse::<AccessToken>(),
            Err(AccessTokenParseError::TokenInvalid(TokenParseError::Expired))
        );
    }
}
