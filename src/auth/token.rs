use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use std::{fmt::Display, str::FromStr};

/// The unsigned parts of an identity token plus whatever proof was attached.
/// See [`AccessToken`](super::access_token::AccessToken) for signing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    /// email of the user the token was issued to
    pub subject: String,
    pub expires: DateTime<Utc>,
    pub proof: String,
}

impl Token {
    pub fn new(subject: String, expires: DateTime<Utc>, proof: String) -> Self {
        Self {
            subject,
            expires,
            proof,
        }
    }

    pub fn is_expired(&self) -> bool {
        // check if expiry is before now
        self.expires < Utc::now()
    }

    /// The part of the serialized token covered by the signature:
    /// `BASE64URL(subject).BASE64URL(expiry)`
    pub fn payload(&self) -> String {
        // the wire format holds a u32, saturate instead of wrapping around
        let expiry = u32::try_from(self.expires.timestamp().max(0)).unwrap_or(u32::MAX);
        let expiry: [u8; 4] = expiry.to_be_bytes();

        format!(
            "{}.{}",
            base64_url::encode(&self.subject),
            base64_url::encode(&expiry)
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.payload(), self.proof)
    }
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum TokenParseError {
    InvalidFormat,
    Expired,
}

impl FromStr for Token {
    type Err = TokenParseError;

    /// Parses a token and checks its expiry. Does not check the signature.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let subject = parts.next().ok_or(TokenParseError::InvalidFormat)?;
        let expires = parts.next().ok_or(TokenParseError::InvalidFormat)?;
        let proof = parts.next().ok_or(TokenParseError::InvalidFormat)?;

        if parts.next().is_some() {
            return Err(TokenParseError::InvalidFormat);
        }

        // emails contain dots, so the subject is base64 encoded too
        let subject = base64_url::decode(subject).map_err(|_| TokenParseError::InvalidFormat)?;
        let subject = String::from_utf8(subject).map_err(|_| TokenParseError::InvalidFormat)?;

        let expires = base64_url::decode(expires).map_err(|_| TokenParseError::InvalidFormat)?;
        let expires: [u8; 4] = expires
            .as_slice()
            .try_into()
            .map_err(|_| TokenParseError::InvalidFormat)?;
        let expires = u32::from_be_bytes(expires);

        let expires = DateTime::<Utc>::from_timestamp(expires as i64, 0)
            .ok_or(TokenParseError::InvalidFormat)?;

        let tok = Self::new(subject, expires, proof.to_string());
        if tok.is_expired() {
            return Err(TokenParseError::Expired);
        }

        Ok(tok)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn in_an_hour() -> DateTime<Utc> {
        // tokens only carry whole seconds
        DateTime::<Utc>::from_timestamp((Utc::now() + Duration::hours(1)).timestamp(), 0).unwrap()
    }

    #[test]
    fn email_subject_survives_serialization() {
        let token = Token::new("first.last@x.com".into(), in_an_hour(), "proof".into());
        let parsed: Token = token.to_string().parse().unwrap();

        assert_eq!(parsed, token);
        assert_eq!(token.to_string().split('.').count(), 3);
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!("a.b".parse::<Token>(), Err(TokenParseError::InvalidFormat));
        assert_eq!("a.b.c.d".parse::<Token>(), Err(TokenParseError::InvalidFormat));
        assert_eq!("".parse::<Token>(), Err(TokenParseError::InvalidFormat));
    }

    #[test]
    fn rejects_bad_expiry_encoding() {
        let subject = base64_url::encode("ana@x.com");
        let too_long = base64_url::encode(&[0u8; 8]);

        assert_eq!(
            format!("{}.{}.sig", subject, too_long).parse::<Token>(),
            Err(TokenParseError::InvalidFormat)
        );
        assert_eq!(
            format!("{}.!!.sig", subject).parse::<Token>(),
            Err(TokenParseError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_expired() {
        let past = Utc::now() - Duration::minutes(5);
        let token = Token::new("ana@x.com".into(), past, "proof".into());

        assert_eq!(token.to_string().parse::<Token>(), Err(TokenParseError::Expired));
    }

    #[test]
    fn expiry_outside_u32_saturates() {
        let far_future = DateTime::<Utc>::from_timestamp(u32::MAX as i64 + 3600, 0).unwrap();
        let token = Token::new("ana@x.com".into(), far_future, "proof".into());
        let parsed: Token = token.to_string().parse().unwrap();
        assert_eq!(parsed.expires.timestamp(), u32::MAX as i64);

        let before_epoch = DateTime::<Utc>::from_timestamp(-3600, 0).unwrap();
        let token = Token::new("ana@x.com".into(), before_epoch, "proof".into());
        assert_eq!(token.to_string().parse::<Token>(), Err(TokenParseError::Expired));
    }
}
