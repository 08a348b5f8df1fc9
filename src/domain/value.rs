use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account identifier (`AccountSid`).
///
/// Invariant: non-empty after trimming. Used both as the basic-auth user name and as a
/// path segment of the messages endpoint.
pub struct AccountSid(String);

impl AccountSid {
    /// Name used by Twilio for this value (`AccountSid`).
    pub const FIELD: &'static str = "AccountSid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Twilio auth token, the basic-auth password for every call.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
///
/// The value is secret: `Debug` redacts it and there is no `Display` impl.
pub struct AuthToken(String);

impl AuthToken {
    /// Name used by Twilio for this value (`AuthToken`).
    pub const FIELD: &'static str = "AuthToken";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    ///
    /// Only the HTTP transport should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sending number (`From`) used for every dispatched message.
///
/// Invariant: non-empty after trimming. No E.164 normalization is applied; the number (or
/// alphanumeric sender) must be enabled on the Twilio account.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Form field name used by Twilio (`From`).
    pub const FIELD: &'static str = "From";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
