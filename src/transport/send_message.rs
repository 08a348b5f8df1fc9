use serde::Deserialize;

use super::money::TransportPrice;
use crate::domain::{BODY_FIELD, MessageResource, SendMessage, SenderNumber, TO_FIELD};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message resource has an empty sid")]
    EmptySid,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    price: TransportPrice,
    #[serde(default)]
    price_unit: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Error payload Twilio returns for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

pub fn encode_send_message_form(request: &SendMessage) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::with_capacity(3);
    if let Some(body) = request.body() {
        params.push((BODY_FIELD.to_owned(), body.to_owned()));
    }
    if let Some(to) = request.to() {
        params.push((TO_FIELD.to_owned(), to.to_owned()));
    }
    params.push((
        SenderNumber::FIELD.to_owned(),
        request.from().as_str().to_owned(),
    ));
    params
}

pub fn decode_message_json_response(json: &str) -> Result<MessageResource, TransportError> {
    let parsed: MessageJsonResource = serde_json::from_str(json)?;
    if parsed.sid.trim().is_empty() {
        return Err(TransportError::EmptySid);
    }

    Ok(MessageResource {
        sid: parsed.sid,
        status: parsed.status,
        price: parsed.price.into_option(),
        price_unit: parsed.price_unit,
        to: parsed.to,
        from: parsed.from,
        error_code: parsed.error_code,
        error_message: parsed.error_message,
    })
}

/// Returns the Twilio error payload if `json` is one, `None` for anything else.
pub fn decode_api_error(json: &str) -> Option<ApiErrorBody> {
    serde_json::from_str::<ApiErrorBody>(json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SenderNumber {
        SenderNumber::new("+15559999999").unwrap()
    }

    #[test]
    fn encode_uses_body_to_from_in_order() {
        let req = SendMessage::new(
            Some("+15551234567".to_owned()),
            Some("Hi".to_owned()),
            sender(),
        );
        assert_eq!(
            encode_send_message_form(&req),
            vec![
                ("Body".to_owned(), "Hi".to_owned()),
                ("To".to_owned(), "+15551234567".to_owned()),
                ("From".to_owned(), "+15559999999".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_omits_absent_fields_and_keeps_empty_ones() {
        let req = SendMessage::new(None, Some(String::new()), sender());
        assert_eq!(
            encode_send_message_form(&req),
            vec![
                ("Body".to_owned(), String::new()),
                ("From".to_owned(), "+15559999999".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_message_resource() {
        let json = r#"
        {
          "sid": "SM123",
          "status": "queued",
          "price": "-0.00750",
          "price_unit": "USD",
          "to": "+15551234567",
          "from": "+15559999999",
          "error_code": null,
          "error_message": null,
          "num_segments": "1"
        }
        "#;

        let resource = decode_message_json_response(json).unwrap();
        assert_eq!(resource.sid, "SM123");
        assert_eq!(resource.status.as_deref(), Some("queued"));
        assert_eq!(resource.price.as_deref(), Some("-0.00750"));
        assert_eq!(resource.price_unit.as_deref(), Some("USD"));
        assert_eq!(resource.error_code, None);
    }

    #[test]
    fn decode_message_resource_without_price() {
        let resource = decode_message_json_response(r#"{"sid": "SM1", "price": null}"#).unwrap();
        assert_eq!(resource.price, None);
    }

    #[test]
    fn decode_rejects_missing_or_blank_sid() {
        assert!(matches!(
            decode_message_json_response("{}"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_message_json_response(r#"{"sid": " "}"#),
            Err(TransportError::EmptySid)
        ));
    }

    #[test]
    fn decode_api_error_payload() {
        let json = r#"
        {
          "code": 21211,
          "message": "The 'To' number is not a valid phone number.",
          "more_info": "https://www.twilio.com/docs/errors/21211",
          "status": 400
        }
        "#;
        let err = decode_api_error(json).unwrap();
        assert_eq!(err.code, 21211);
        assert_eq!(err.status, Some(400));
        assert!(decode_api_error("<html>bad gateway</html>").is_none());
        assert!(decode_api_error(r#"{"sid": "SM1"}"#).is_none());
    }
}
