//! # Transport Seam
//!
//! The HTTP executor every index operation goes through. The core never
//! opens connections itself; callers inject an implementation (the
//! `graphdex` binary provides one over reqwest, tests provide in-memory ones).

use crate::types::TransportError;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// HTTP methods used by the index API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    /// JSON payload, sent with a JSON content type when present.
    pub body: Option<serde_json::Value>,
}

impl Request {
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    #[must_use]
    pub const fn post(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Some(body),
        }
    }

    #[must_use]
    pub const fn delete(url: Url) -> Self {
        Self {
            method: Method::Delete,
            url,
            body: None,
        }
    }
}

/// A completed response: status code and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A response with no body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Executes one request/response cycle.
///
/// Implementations must be safe to share between concurrent operations.
/// Timeouts, retries and authentication belong here, not in the core.
pub trait Transport: Send + Sync {
    fn execute(&self, request: Request)
    -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).execute(request)
    }
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

/// Scripted transport for unit tests: replays queued responses in order and
/// records every request it receives.
#[cfg(test)]
pub(crate) mod scripted {
    use super::{Request, Response, Transport};
    use crate::types::TransportError;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<Response, TransportError>>>,
        requests: Mutex<Vec<Request>>,
    }

    impl ScriptedTransport {
        pub(crate) fn replying(replies: Vec<Result<Response, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<Request> {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(
            &self,
            request: Request,
        ) -> impl Future<Output = Result<Response, TransportError>> + Send {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(request);
            let reply = self
                .replies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())));
            std::future::ready(reply)
        }
    }
}
