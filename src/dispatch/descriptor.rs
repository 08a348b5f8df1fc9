//! Static capability descriptor the host uses to register the adapter.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A configuration property as declared to the host.
pub struct PropertyDescriptor {
    /// Display name; also the key in a host-supplied property map.
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Sensitive values must never be logged, echoed, or included in errors.
    pub sensitive: bool,
}

pub const ACCOUNT_ID: PropertyDescriptor = PropertyDescriptor {
    name: "Account Id",
    description: "Twilio Account Id",
    required: true,
    sensitive: false,
};

pub const AUTH_TOKEN: PropertyDescriptor = PropertyDescriptor {
    name: "Auth token",
    description: "Twilio Auth token",
    required: true,
    sensitive: true,
};

pub const FROM_NUMBER: PropertyDescriptor = PropertyDescriptor {
    name: "From",
    description: "Twilio sending number",
    required: true,
    sensitive: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Routing outcome a processed work unit is transferred to.
pub enum Relationship {
    Success,
    Failure,
}

impl Relationship {
    pub const ALL: [Self; 2] = [Self::Success, Self::Failure];

    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Success => "Message sent successfully",
            Self::Failure => "Message failed to send",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// Destination number, with `+CountryCode`.
pub const SMS_TO: &str = "sms.to";
/// Message text.
pub const SMS_BODY: &str = "sms.body";
/// Message sid assigned by Twilio.
pub const SMS_SID: &str = "sms.sid";
/// Price Twilio reports for the message.
pub const SMS_PRICE: &str = "sms.price";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Everything the host needs to register the adapter: properties, relationships, and the
/// attribute contract.
pub struct ProcessorDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub properties: &'static [PropertyDescriptor],
    pub relationships: &'static [Relationship],
    pub reads_attributes: &'static [AttributeDescriptor],
    pub writes_attributes: &'static [AttributeDescriptor],
}

impl ProcessorDescriptor {
    /// Look up a declared property by display name.
    pub fn property(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Look up a declared relationship by name.
    pub fn relationship(&self, name: &str) -> Option<Relationship> {
        self.relationships
            .iter()
            .copied()
            .find(|relationship| relationship.name() == name)
    }
}

pub static DESCRIPTOR: ProcessorDescriptor = ProcessorDescriptor {
    name: "PutSMSTwilio",
    description: "Sends messages to the twilio service. Currently supports simple SMS",
    tags: &["sms", "twilio", "notification"],
    properties: &[ACCOUNT_ID, AUTH_TOKEN, FROM_NUMBER],
    relationships: &Relationship::ALL,
    reads_attributes: &[
        AttributeDescriptor {
            name: SMS_TO,
            description: "Phone number to send to, with +CountryCode",
        },
        AttributeDescriptor {
            name: SMS_BODY,
            description: "Message body to send",
        },
    ],
    writes_attributes: &[
        AttributeDescriptor {
            name: SMS_SID,
            description: "Unique Message Identifier from Twilio",
        },
        AttributeDescriptor {
            name: SMS_PRICE,
            description: "The cost of sending the message",
        },
    ],
};
