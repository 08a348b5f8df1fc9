//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{AccountSid, AuthToken, MessageResource, SendMessage};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const API_VERSION: &str = "2010-04-01";

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

#[derive(Debug, Clone)]
/// Basic-auth pair sent with every request; `Debug` inherits the token redaction.
pub(crate) struct Credentials {
    pub(crate) account_sid: AccountSid,
    pub(crate) auth_token: AuthToken,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(
                    credentials.account_sid.as_str(),
                    Some(credentials.auth_token.expose()),
                )
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
///
/// [`TwilioError::HttpStatus`] and [`TwilioError::Api`] mean Twilio answered and refused
/// the message; everything else means no usable answer was obtained. None of the variants
/// carry the auth token.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code without a Twilio error payload.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio returned its error payload (`code`, `message`, `more_info`).
    #[error("API error {code} (HTTP {status}): {message:?}")]
    Api {
        status: u16,
        code: i64,
        message: Option<String>,
        more_info: Option<String>,
    },

    /// Response body could not be parsed as a message resource.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured API base cannot be turned into a messages endpoint.
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl TwilioError {
    /// Whether Twilio itself rejected the request (as opposed to it never being answered).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Api { .. })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base, timeout, or user-agent.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent override.
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Self {
        Self {
            credentials: Credentials {
                account_sid,
                auth_token,
            },
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (default `https://api.twilio.com`).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        let messages_url = messages_url(&self.api_base, &self.credentials.account_sid)?;

        Ok(TwilioClient {
            credentials: self.credentials,
            messages_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Minimal Twilio REST client: creates SMS message resources.
///
/// Every call is authenticated with HTTP basic auth (`AccountSid:AuthToken`) and posts to
/// `{api_base}/2010-04-01/Accounts/{AccountSid}/Messages.json`.
pub struct TwilioClient {
    credentials: Credentials,
    messages_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default API base.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Result<Self, TwilioError> {
        Self::builder(account_sid, auth_token).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(account_sid: AccountSid, auth_token: AuthToken) -> TwilioClientBuilder {
        TwilioClientBuilder::new(account_sid, auth_token)
    }

    /// The endpoint every message is posted to.
    pub fn messages_url(&self) -> &str {
        self.messages_url.as_str()
    }

    /// Create a message resource, i.e. send one SMS.
    ///
    /// Errors:
    /// - [`TwilioError::Api`] when Twilio answers with its error payload,
    /// - [`TwilioError::HttpStatus`] for other non-2xx responses,
    /// - [`TwilioError::Transport`] / [`TwilioError::Parse`] when no usable answer arrives.
    pub async fn send_message(&self, request: SendMessage) -> Result<MessageResource, TwilioError> {
        let params = crate::transport::encode_send_message_form(&request);

        let response = self
            .http
            .post_form(self.messages_url.as_str(), &self.credentials, params)
            .await
            .map_err(TwilioError::Transport)?;

        if let Some(api_error) = crate::transport::decode_api_error(&response.body) {
            return Err(TwilioError::Api {
                status: api_error.status.unwrap_or(response.status),
                code: api_error.code,
                message: api_error.message,
                more_info: api_error.more_info,
            });
        }

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TwilioError::HttpStatus {
                status: response.status,
                body,
            });
        }

        crate::transport::decode_message_json_response(&response.body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }
}

fn messages_url(api_base: &str, account_sid: &AccountSid) -> Result<Url, TwilioError> {
    let mut url = Url::parse(api_base).map_err(|err| TwilioError::InvalidUrl(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| TwilioError::InvalidUrl(api_base.to_owned()))?
        .pop_if_empty()
        .extend([API_VERSION, "Accounts", account_sid.as_str(), "Messages.json"]);
    Ok(url)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub(crate) url: String,
        pub(crate) username: String,
        pub(crate) password: String,
        pub(crate) params: Vec<(String, String)>,
    }

    #[derive(Debug)]
    enum Outcome {
        Respond { status: u16, body: String },
        Fail(String),
    }

    #[derive(Debug, Clone)]
    pub(crate) struct FakeTransport {
        outcome: Arc<Outcome>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeTransport {
        pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
            Self {
                outcome: Arc::new(Outcome::Respond {
                    status,
                    body: body.into(),
                }),
                requests: Arc::default(),
            }
        }

        pub(crate) fn failing(reason: impl Into<String>) -> Self {
            Self {
                outcome: Arc::new(Outcome::Fail(reason.into())),
                requests: Arc::default(),
            }
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn client(&self, account_sid: &str, auth_token: &str) -> TwilioClient {
            let account_sid = AccountSid::new(account_sid).unwrap();
            TwilioClient {
                messages_url: messages_url("https://example.invalid", &account_sid).unwrap(),
                credentials: Credentials {
                    account_sid,
                    auth_token: AuthToken::new(auth_token).unwrap(),
                },
                http: Arc::new(self.clone()),
            }
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            credentials: &'a Credentials,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                self.requests.lock().unwrap().push(RecordedRequest {
                    url: url.to_owned(),
                    username: credentials.account_sid.as_str().to_owned(),
                    password: credentials.auth_token.expose().to_owned(),
                    params,
                });
                match self.outcome.as_ref() {
                    Outcome::Respond { status, body } => Ok(HttpResponse {
                        status: *status,
                        body: body.clone(),
                    }),
                    Outcome::Fail(reason) => Err(reason.clone().into()),
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::SenderNumber;

    use super::testing::FakeTransport;
    use super::*;

    fn message(to: &str, body: &str) -> SendMessage {
        SendMessage::new(
            Some(to.to_owned()),
            Some(body.to_owned()),
            SenderNumber::new("+15559999999").unwrap(),
        )
    }

    #[tokio::test]
    async fn send_message_posts_form_with_basic_auth_and_parses_resource() {
        let json = r#"
        {
          "sid": "SM123",
          "status": "queued",
          "price": "0.0075",
          "price_unit": "USD"
        }
        "#;

        let transport = FakeTransport::new(201, json);
        let client = transport.client("ACxxx", "secret");

        let resource = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap();
        assert_eq!(resource.sid, "SM123");
        assert_eq!(resource.price.as_deref(), Some("0.0075"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.url,
            "https://example.invalid/2010-04-01/Accounts/ACxxx/Messages.json"
        );
        assert_eq!(request.username, "ACxxx");
        assert_eq!(request.password, "secret");
        assert_eq!(
            request.params,
            vec![
                ("Body".to_owned(), "hello".to_owned()),
                ("To".to_owned(), "+15551234567".to_owned()),
                ("From".to_owned(), "+15559999999".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn send_message_maps_error_payload_to_api_error() {
        let json = r#"
        {
          "code": 20003,
          "message": "Authenticate",
          "more_info": "https://www.twilio.com/docs/errors/20003",
          "status": 401
        }
        "#;

        let transport = FakeTransport::new(401, json);
        let client = transport.client("ACxxx", "wrong");

        let err = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        match err {
            TwilioError::Api {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 401);
                assert_eq!(code, 20003);
                assert_eq!(message.as_deref(), Some("Authenticate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_message_maps_non_success_http_status() {
        let transport = FakeTransport::new(502, "<html>bad gateway</html>");
        let client = transport.client("ACxxx", "secret");

        let err = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(
            err,
            TwilioError::HttpStatus {
                status: 502,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn send_message_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = transport.client("ACxxx", "secret");

        let err = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TwilioError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn send_message_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(201, "{ not json }");
        let client = transport.client("ACxxx", "secret");

        let err = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap_err();
        assert!(!err.is_rejection());
        assert!(matches!(err, TwilioError::Parse(_)));
    }

    #[tokio::test]
    async fn send_message_surfaces_transport_failures() {
        let transport = FakeTransport::failing("connection reset");
        let client = transport.client("ACxxx", "secret");

        let err = client
            .send_message(message("+15551234567", "hello"))
            .await
            .unwrap_err();
        assert!(!err.is_rejection());
        assert!(matches!(err, TwilioError::Transport(_)));
    }

    #[test]
    fn errors_never_render_the_auth_token() {
        let client = FakeTransport::new(200, "{}").client("ACxxx", "super-secret");
        assert!(!format!("{:?}", client.credentials).contains("super-secret"));
    }

    #[test]
    fn builder_api_base_override_is_applied() {
        let sid = AccountSid::new("AC123").unwrap();
        let token = AuthToken::new("secret").unwrap();

        let client = TwilioClient::builder(sid.clone(), token.clone())
            .api_base("http://127.0.0.1:8080/twilio/")
            .build()
            .unwrap();
        assert_eq!(
            client.messages_url(),
            "http://127.0.0.1:8080/twilio/2010-04-01/Accounts/AC123/Messages.json"
        );

        let client = TwilioClient::new(sid.clone(), token.clone()).unwrap();
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );

        let err = TwilioClient::builder(sid, token)
            .api_base("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TwilioError::InvalidUrl(_)));
    }
}
