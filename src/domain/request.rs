use crate::domain::value::SenderNumber;

/// Twilio form field for the message text.
pub const BODY_FIELD: &str = "Body";
/// Twilio form field for the destination number.
pub const TO_FIELD: &str = "To";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound message (`POST .../Messages.json`).
///
/// `to` and `body` are deliberately unvalidated: absent values are omitted from the form
/// and empty values are sent as-is, leaving rejection to Twilio.
pub struct SendMessage {
    to: Option<String>,
    body: Option<String>,
    from: SenderNumber,
}

impl SendMessage {
    pub fn new(to: Option<String>, body: Option<String>, from: SenderNumber) -> Self {
        Self { to, body, from }
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn from(&self) -> &SenderNumber {
        &self.from
    }
}
