/*

   security.rs

   Validation of user supplied input. Every check returns the first failing
   field so the client gets one precise message instead of a list.

   Cryptographic functions should be put in crypto.rs.

*/

use derive_more::{Display, Error};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap();
}

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_PASSWORD_LEN: usize = 256;

#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "{}: {}", field, reason)]
pub struct InvalidInput {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidInput {
    fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

pub fn validate_name(name: &str) -> Result<(), InvalidInput> {
    if name.trim().is_empty() {
        return Err(InvalidInput::new("name", "must not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(InvalidInput::new("name", "must be at most 100 characters"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), InvalidInput> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(InvalidInput::new("email", "must be at most 254 characters"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(InvalidInput::new("email", "is not a valid email address"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), InvalidInput> {
    if password.is_empty() {
        return Err(InvalidInput::new("password", "must not be empty"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(InvalidInput::new("password", "must be at most 256 bytes"));
    }
    Ok(())
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), InvalidInput> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_registration() {
        assert_eq!(validate_registration("Ana", "ana@x.com", "p1"), Ok(()));
    }

    #[test]
    fn reports_first_failing_field() {
        let err = validate_registration(" ", "nope", "").unwrap_err();
        assert_eq!(err.field, "name");

        let err = validate_registration("Ana", "nope", "").unwrap_err();
        assert_eq!(err.field, "email");

        let err = validate_registration("Ana", "ana@x.com", "").unwrap_err();
        assert_eq!(err.field, "password");
        assert_eq!(err.to_string(), "password: must not be empty");
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("no-at-sign.example.org").is_err());
        assert!(validate_email("trailing@dot.").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(validate_name(&"é".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name(&"é".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
