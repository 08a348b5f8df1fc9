#[derive(Debug, Clone, PartialEq, Eq)]
/// Message resource created by Twilio for an accepted send.
///
/// `price` is usually `None` right after creation; Twilio fills it in once the carrier
/// reports the cost. Money values are kept as the raw token Twilio returned.
pub struct MessageResource {
    pub sid: String,
    pub status: Option<String>,
    pub price: Option<String>,
    pub price_unit: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}
