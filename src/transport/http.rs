//! HTTP transport abstraction shared by both vendor adapters.
//!
//! Adapters describe requests as data ([`HttpRequest`]) and hand them to an
//! [`HttpTransport`]. Production code uses [`ReqwestTransport`]; tests swap in
//! a fake that records requests and counts calls.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HttpBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    /// HTTP basic credentials (Twilio); applied by the transport.
    pub basic_auth: Option<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            body: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((user.into(), password.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(HttpBody::Json(body));
        self
    }

    pub fn form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = Some(HttpBody::Form(params));
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

pub(crate) trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a fresh `reqwest` client.
    ///
    /// `verify_tls: false` disables certificate verification and exists only
    /// for parity testing against the aggregator's historically unverified
    /// endpoint; leave it on everywhere else.
    pub fn new(verify_tls: bool) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(Self { client })
    }
}

/// Build a fresh transport, falling back to one whose every call fails when
/// the TLS backend cannot initialize. Adapter construction stays infallible
/// and the failure surfaces later as a tagged transport error.
pub(crate) fn build_transport(verify_tls: bool) -> std::sync::Arc<dyn HttpTransport> {
    match ReqwestTransport::new(verify_tls) {
        Ok(transport) => std::sync::Arc::new(transport),
        Err(err) => {
            tracing::error!(error = %err, "failed to build HTTP client");
            std::sync::Arc::new(UnavailableTransport {
                reason: err.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone)]
struct UnavailableTransport {
    reason: String,
}

impl HttpTransport for UnavailableTransport {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move { Err(self.reason.clone().into()) })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(*name, value);
            }
            if let Some((user, password)) = &request.basic_auth {
                builder = builder.basic_auth(user, Some(password));
            }
            match &request.body {
                Some(HttpBody::Json(body)) => builder = builder.json(body),
                Some(HttpBody::Form(params)) => builder = builder.form(params),
                None => {}
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{Arc, Mutex};

    use super::{BoxError, BoxFuture, HttpRequest, HttpResponse, HttpTransport};

    /// Canned-response transport recording every request it sees.
    #[derive(Debug, Clone)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        response_status: u16,
        response_body: String,
        fail_with: Option<String>,
    }

    impl FakeTransport {
        pub fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                    fail_with: None,
                })),
            }
        }

        /// A transport whose every call fails at the connection level.
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response_status: 0,
                    response_body: String::new(),
                    fail_with: Some(message.into()),
                })),
            }
        }

        pub fn calls(&self) -> usize {
            self.state.lock().unwrap().requests.len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.state.lock().unwrap().requests.last().cloned()
        }
    }

    impl HttpTransport for FakeTransport {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async move {
                let (status, body, fail_with) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(request);
                    (
                        state.response_status,
                        state.response_body.clone(),
                        state.fail_with.clone(),
                    )
                };
                if let Some(message) = fail_with {
                    return Err(message.into());
                }
                Ok(HttpResponse { status, body })
            })
        }
    }
}
