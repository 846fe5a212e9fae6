//! Request-side header names and the request id extension.
//!
//! # Responsibilities
//! - Name the headers the middleware reads and writes
//! - Expose the resolved id to downstream handlers via request extensions

use std::fmt;

use http::{HeaderName, HeaderValue, Request};

/// Request id header. Header names are case-insensitive; this is the canonical lowercase form.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// W3C trace context header.
pub const TRACEPARENT: HeaderName = HeaderName::from_static("traceparent");

/// The request id resolved for a request, stored in its extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    pub fn new(value: HeaderValue) -> Self {
        Self(value)
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }

    /// The id as text, if it is visible ASCII.
    pub fn as_str(&self) -> Option<&str> {
        self.0.to_str().ok()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.0.as_bytes()))
    }
}

/// Access to the [`RequestId`] attached by the middleware.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}
