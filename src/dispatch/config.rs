use std::collections::BTreeMap;
use std::env::VarError;
use std::fmt;

use crate::dispatch::descriptor::{ACCOUNT_ID, AUTH_TOKEN, FROM_NUMBER, PropertyDescriptor};
use crate::domain::{AccountSid, AuthToken, SenderNumber, ValidationError};

pub const ACCOUNT_ID_ENV: &str = "TWILIO_ACCOUNT_SID";
pub const AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
pub const FROM_NUMBER_ENV: &str = "TWILIO_FROM_NUMBER";

#[derive(Debug, thiserror::Error)]
/// Configuration rejected before any work is processed.
///
/// Only property names are reported, never their values.
pub enum ConfigError {
    #[error("required property '{property}' is not set")]
    Missing { property: &'static str },

    #[error("property '{property}' is not valid unicode")]
    NotUnicode { property: &'static str },

    #[error("property '{property}' is invalid: {source}")]
    Invalid {
        property: &'static str,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone)]
/// Validated adapter configuration; read-only once built.
pub struct DispatchConfig {
    account_sid: AccountSid,
    auth_token: AuthToken,
    from: SenderNumber,
}

impl DispatchConfig {
    /// Validate the three required values.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            account_sid: validate(&ACCOUNT_ID, AccountSid::new(account_sid))?,
            auth_token: validate(&AUTH_TOKEN, AuthToken::new(auth_token))?,
            from: validate(&FROM_NUMBER, SenderNumber::new(from))?,
        })
    }

    /// Build from a host-supplied property map keyed by property display name
    /// (`Account Id`, `Auth token`, `From`).
    pub fn from_properties(properties: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |descriptor: &PropertyDescriptor| {
            properties
                .get(descriptor.name)
                .cloned()
                .ok_or(ConfigError::Missing {
                    property: descriptor.name,
                })
        };
        Self::new(
            lookup(&ACCOUNT_ID)?,
            lookup(&AUTH_TOKEN)?,
            lookup(&FROM_NUMBER)?,
        )
    }

    /// Build from `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and `TWILIO_FROM_NUMBER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var))
    }

    /// Same as [`DispatchConfig::from_env`], reading variables through `read_var`.
    fn from_vars<F>(read_var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let lookup = |descriptor: &PropertyDescriptor, var: &str| match read_var(var) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) => Err(ConfigError::Missing {
                property: descriptor.name,
            }),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                property: descriptor.name,
            }),
        };
        Self::new(
            lookup(&ACCOUNT_ID, ACCOUNT_ID_ENV)?,
            lookup(&AUTH_TOKEN, AUTH_TOKEN_ENV)?,
            lookup(&FROM_NUMBER, FROM_NUMBER_ENV)?,
        )
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    pub fn from(&self) -> &SenderNumber {
        &self.from
    }
}

impl fmt::Display for DispatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}, {}=***, {}={}",
            ACCOUNT_ID.name,
            self.account_sid.as_str(),
            AUTH_TOKEN.name,
            FROM_NUMBER.name,
            self.from.as_str()
        )
    }
}

fn validate<T>(
    descriptor: &PropertyDescriptor,
    value: Result<T, ValidationError>,
) -> Result<T, ConfigError> {
    value.map_err(|source| ConfigError::Invalid {
        property: descriptor.name,
        source,
    })
}
