//! # HTTP Transport
//!
//! reqwest-backed implementation of graphdex-core's `Transport`.
//! One call is one HTTP request: no retries.

use crate::config::Config;
use crate::error::AppError;
use graphdex_core::{Method, Request, Response, Transport, TransportError};
use reqwest::header::{ACCEPT, HeaderValue};
use std::future::Future;
use std::time::Duration;

#[derive(Clone)]
enum Auth {
    None,
    Bearer(String),
    Basic { username: String, password: String },
}

/// HTTP transport with optional Bearer or Basic auth.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    auth: Auth,
}

impl HttpTransport {
    /// Build a transport from validated configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let auth = match (&config.api_key, &config.username, &config.password) {
            (Some(key), _, _) => Auth::Bearer(key.clone()),
            (None, Some(username), Some(password)) => Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Auth::None,
        };
        Ok(Self {
            http: builder.build()?,
            auth,
        })
    }

    /// Build a request with JSON accept header and configured auth.
    fn request(&self, method: Method, url: url::Url) -> reqwest::RequestBuilder {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        let req = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        match &self.auth {
            Auth::None => req,
            Auth::Bearer(key) => req.bearer_auth(key),
            Auth::Basic { username, password } => req.basic_auth(username, Some(password)),
        }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        let target = format!("{} {}", request.method.as_str(), request.url);
        let mut req = self.request(request.method, request.url);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        async move {
            let resp = req
                .send()
                .await
                .map_err(|e| TransportError(format!("{target}: {e}")))?;
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError(format!("{target}: reading body: {e}")))?;
            tracing::trace!(%target, status, "response received");
            Ok(Response::new(status, body))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
