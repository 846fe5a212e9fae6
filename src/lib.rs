//! X-Request-ID middleware for reverse-proxy handler chains.
//!
//! Every request leaving this middleware carries a request id whenever one
//! can be determined:
//!
//! - an upstream `X-Request-ID` is kept untouched
//! - otherwise the trace id of a well-formed `traceparent` becomes the id
//! - a malformed `traceparent` is logged and the request passes through
//! - a request without either header is either passed through or given a
//!   fresh id and `traceparent`, depending on [`MissingTracePolicy`]
//!
//! ```rust,no_run
//! use xrequest_trace::{Config, Context, RequestTraceLayer};
//!
//! # fn main() -> Result<(), xrequest_trace::Error> {
//! let layer = RequestTraceLayer::new(&Context::new(), &Config::generating(), "request-trace")?;
//! # let _ = layer;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use config::{Config, MissingTracePolicy};
pub use error::Error;
pub use crate::http::{
    create, Context, RequestId, RequestIdExt, RequestTrace, RequestTraceLayer, Resolution,
    Resolver, TRACEPARENT, X_REQUEST_ID,
};
