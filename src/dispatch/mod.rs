//! Dispatch layer: turns host work units into Twilio sends and routes the outcome.
//!
//! Attribute contract:
//! - reads `sms.to` and `sms.body`,
//! - writes `sms.sid` and `sms.price` on success (additively),
//! - on provider rejection only sets the penalty hint.

mod config;
mod descriptor;
mod work;

pub use config::{ACCOUNT_ID_ENV, AUTH_TOKEN_ENV, ConfigError, DispatchConfig, FROM_NUMBER_ENV};
pub use descriptor::{
    ACCOUNT_ID, AUTH_TOKEN, AttributeDescriptor, DESCRIPTOR, FROM_NUMBER, ProcessorDescriptor,
    PropertyDescriptor, Relationship, SMS_BODY, SMS_PRICE, SMS_SID, SMS_TO,
};
pub use work::{DispatchResult, ProcessSession, Routed, WorkUnit};

use crate::client::{TwilioClient, TwilioClientBuilder, TwilioError};
use crate::domain::{SendMessage, SenderNumber};

#[derive(Debug, thiserror::Error)]
/// The send was not answered by Twilio (network failure, unreadable response).
///
/// The unit was not routed; it is handed back unchanged so the host can re-drive it.
#[error("message could not be sent: {source}")]
pub struct DispatchFault {
    pub unit: Box<WorkUnit>,
    #[source]
    pub source: TwilioError,
}

#[derive(Clone)]
/// Sends one SMS per work unit and routes it to `success` or `failure`.
///
/// Holds only read-only state, so one instance can serve concurrent workers.
pub struct SmsDispatcher {
    client: TwilioClient,
    from: SenderNumber,
}

impl SmsDispatcher {
    /// Build a dispatcher talking to the public Twilio API.
    pub fn new(config: DispatchConfig) -> Result<Self, TwilioError> {
        Self::with_client_options(config, |builder| builder)
    }

    /// Build a dispatcher, letting the caller adjust the HTTP client (timeout, API base,
    /// user-agent).
    pub fn with_client_options<F>(
        config: DispatchConfig,
        configure: F,
    ) -> Result<Self, TwilioError>
    where
        F: FnOnce(TwilioClientBuilder) -> TwilioClientBuilder,
    {
        let builder =
            TwilioClient::builder(config.account_sid().clone(), config.auth_token().clone());
        let client = configure(builder).build()?;
        tracing::debug!(%config, endpoint = client.messages_url(), "sms dispatcher configured");

        Ok(Self {
            client,
            from: config.from().clone(),
        })
    }

    /// Capability descriptor for registering the adapter with the host.
    pub fn descriptor() -> &'static ProcessorDescriptor {
        &DESCRIPTOR
    }

    /// Send the message carried by `work` and decide where the unit goes.
    ///
    /// - `None` is a no-op: no call is made and `Ok(None)` is returned.
    /// - Provider acceptance adds `sms.sid` (and `sms.price` when known) and routes to
    ///   [`Relationship::Success`].
    /// - Provider rejection penalizes the unit and routes to [`Relationship::Failure`].
    /// - Anything else is a [`DispatchFault`].
    ///
    /// `sms.to` and `sms.body` are not validated locally. Every call sends a new message;
    /// nothing is deduplicated.
    pub async fn dispatch(&self, work: Option<WorkUnit>) -> Result<Option<Routed>, DispatchFault> {
        let Some(mut unit) = work else {
            tracing::trace!("no work unit available");
            return Ok(None);
        };

        let to = unit.attribute(SMS_TO).map(str::to_owned);
        let body = unit.attribute(SMS_BODY).map(str::to_owned);
        warn_if_blank(SMS_TO, to.as_deref());
        warn_if_blank(SMS_BODY, body.as_deref());

        let masked_to = to.as_deref().map(mask_number).unwrap_or_default();
        tracing::debug!(to = %masked_to, "sending sms");

        let request = SendMessage::new(to, body, self.from.clone());
        match self.client.send_message(request).await {
            Ok(message) => {
                let mut written = vec![(SMS_SID, message.sid.clone())];
                if let Some(price) = message.price.as_ref() {
                    written.push((SMS_PRICE, price.clone()));
                }
                unit.put_all_attributes(written);

                tracing::info!(sid = %message.sid, to = %masked_to, "sms sent");
                Ok(Some(Routed {
                    unit,
                    relationship: Relationship::Success,
                    result: DispatchResult::Success {
                        sid: message.sid,
                        price: message.price,
                    },
                }))
            }
            Err(err) if err.is_rejection() => {
                tracing::warn!(error = %err, to = %masked_to, "twilio rejected sms");
                unit.penalize();
                Ok(Some(Routed {
                    unit,
                    relationship: Relationship::Failure,
                    result: DispatchResult::Failure,
                }))
            }
            Err(source) => Err(DispatchFault {
                unit: Box::new(unit),
                source,
            }),
        }
    }

    /// Run one processing attempt against a host session.
    ///
    /// Returns the relationship the unit was transferred to, or `None` when the session
    /// had no unit. On a fault the unit is rolled back and the error returned.
    pub async fn on_trigger<S>(&self, session: &mut S) -> Result<Option<Relationship>, TwilioError>
    where
        S: ProcessSession,
    {
        match self.dispatch(session.get()).await {
            Ok(None) => Ok(None),
            Ok(Some(routed)) => {
                session.transfer(routed.unit, routed.relationship);
                Ok(Some(routed.relationship))
            }
            Err(DispatchFault { unit, source }) => {
                session.rollback(*unit);
                Err(source)
            }
        }
    }
}

fn warn_if_blank(attribute: &str, value: Option<&str>) {
    match value {
        None => tracing::warn!(attribute, "attribute missing; sending without it"),
        Some(value) if value.trim().is_empty() => {
            tracing::warn!(attribute, "attribute is blank; sending as-is");
        }
        Some(_) => {}
    }
}

/// Keep only the last four characters of a phone number for logs.
fn mask_number(number: &str) -> String {
    let visible_from = number
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(idx, _)| idx);
    format!("***{}", &number[visible_from..])
}
