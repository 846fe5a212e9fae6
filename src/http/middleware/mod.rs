//! Middleware applied in front of the proxied handler chain.

pub mod request_trace;

pub use request_trace::{create, Context, RequestTrace, RequestTraceLayer};
