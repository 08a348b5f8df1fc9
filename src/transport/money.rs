use serde::Deserialize;
use serde::de::Error as DeError;

/// Twilio `price` field.
///
/// Twilio sends `null` (sometimes `""`) until the carrier reports a cost, then a signed
/// decimal string such as `"-0.00750"`. Some API versions send a bare number instead; its
/// raw JSON token is kept so `0.00750` does not turn into `0.0075`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportPrice(Option<String>);

impl TransportPrice {
    pub fn into_option(self) -> Option<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'n') if token == "null" => Ok(Self(None)),
            Some(b'"') => {
                let price = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                let price = price.trim();
                Ok(Self((!price.is_empty()).then(|| price.to_owned())))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(Some(token.to_owned()))),
            _ => Err(D::Error::custom(
                "expected price to be null, a decimal string, or a number",
            )),
        }
    }
}
