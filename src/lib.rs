//! SMS dispatch adapter for the Twilio REST API.
//!
//! A host hands over work units carrying `sms.to` and `sms.body`; the adapter sends one
//! message per unit and routes the unit to `success` (with `sms.sid` / `sms.price` added)
//! or, penalized, to `failure`. The crate is layered as a domain layer of strong types, a
//! transport layer for wire-format details, a small client layer, and the dispatch layer
//! the host talks to.
//!
//! ```rust,no_run
//! use twilio_sms_dispatch::{DispatchConfig, SmsDispatcher, WorkUnit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DispatchConfig::new("ACxxx", "secret", "+15559999999")?;
//!     let dispatcher = SmsDispatcher::new(config)?;
//!     let work: WorkUnit = [("sms.to", "+15551234567"), ("sms.body", "hello")]
//!         .into_iter()
//!         .collect();
//!     if let Some(routed) = dispatcher.dispatch(Some(work)).await? {
//!         println!("routed to {}", routed.relationship);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod dispatch;
pub mod domain;
mod transport;

pub use client::{TwilioClient, TwilioClientBuilder, TwilioError};
pub use dispatch::{
    ConfigError, DESCRIPTOR, DispatchConfig, DispatchFault, DispatchResult, ProcessSession,
    ProcessorDescriptor, PropertyDescriptor, Relationship, Routed, SmsDispatcher, WorkUnit,
};
pub use domain::{
    AccountSid, AuthToken, MessageResource, SendMessage, SenderNumber, ValidationError,
};
