//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for hosts and tests
//! - Define the diagnostic events emitted while resolving a request id
//! - Provide the log sinks injected into the resolver
//!
//! # Design Decisions
//! - The resolver never talks to a global logger; it holds a [`TraceLog`]
//! - Each event knows its own level and fields
//! - Logging is observational only and never changes control flow

use std::fmt;

use http::HeaderMap;
use tracing::Level;

/// Diagnostic event produced by the resolver.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// Headers as they arrived.
    HeadersReceived(&'a HeaderMap),
    /// A non-empty `X-Request-ID` was already present.
    RequestIdPresent(&'a str),
    /// No usable `X-Request-ID` on the request.
    RequestIdMissing,
    /// A `traceparent` header was found.
    TraceParentFound(&'a str),
    /// The trace id was taken from `traceparent`.
    TraceIdExtracted(&'a str),
    /// `traceparent` did not match the expected grammar.
    TraceParentMalformed(&'a str),
    /// Neither header was present and nothing was generated.
    TraceParentMissing,
    /// Fresh identifiers were generated.
    Generated { trace_id: &'a str, span_id: &'a str },
}

impl TraceEvent<'_> {
    /// Severity of the event.
    pub fn level(&self) -> Level {
        match self {
            Self::TraceParentMalformed(_) => Level::WARN,
            _ => Level::DEBUG,
        }
    }

    /// Short, stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeadersReceived(_) => "headers_received",
            Self::RequestIdPresent(_) => "request_id_present",
            Self::RequestIdMissing => "request_id_missing",
            Self::TraceParentFound(_) => "traceparent_found",
            Self::TraceIdExtracted(_) => "trace_id_extracted",
            Self::TraceParentMalformed(_) => "traceparent_malformed",
            Self::TraceParentMissing => "traceparent_missing",
            Self::Generated { .. } => "generated",
        }
    }
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadersReceived(headers) => write!(f, "headers received: {headers:?}"),
            Self::RequestIdPresent(id) => write!(f, "X-Request-ID header already exists: {id:?}"),
            Self::RequestIdMissing => f.write_str("X-Request-ID header not found"),
            Self::TraceParentFound(value) => write!(f, "traceparent header found: {value:?}"),
            Self::TraceIdExtracted(id) => write!(f, "trace id extracted: {id:?}"),
            Self::TraceParentMalformed(value) => {
                write!(f, "traceparent header does not match expected format: {value:?}")
            }
            Self::TraceParentMissing => f.write_str("traceparent header not found"),
            Self::Generated { trace_id, span_id } => {
                write!(f, "generated trace id {trace_id:?} and span id {span_id:?}")
            }
        }
    }
}

/// Sink for resolver diagnostics.
pub trait TraceLog: Send + Sync {
    /// Record one event for the middleware instance named `instance`.
    fn log(&self, instance: &str, event: &TraceEvent<'_>);
}

/// Forwards events to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl TraceLog for TracingLog {
    fn log(&self, instance: &str, event: &TraceEvent<'_>) {
        match *event {
            TraceEvent::HeadersReceived(headers) => {
                tracing::debug!(instance, headers = ?headers, "Headers received");
            }
            TraceEvent::RequestIdPresent(request_id) => {
                tracing::debug!(instance, request_id, "X-Request-ID already present");
            }
            TraceEvent::RequestIdMissing => {
                tracing::debug!(instance, "X-Request-ID not found");
            }
            TraceEvent::TraceParentFound(traceparent) => {
                tracing::debug!(instance, traceparent, "traceparent found");
            }
            TraceEvent::TraceIdExtracted(trace_id) => {
                tracing::debug!(instance, trace_id, "Trace id extracted from traceparent");
            }
            TraceEvent::TraceParentMalformed(traceparent) => {
                tracing::warn!(instance, traceparent, "traceparent does not match expected format");
            }
            TraceEvent::TraceParentMissing => {
                tracing::debug!(instance, "traceparent not found");
            }
            TraceEvent::Generated { trace_id, span_id } => {
                tracing::debug!(instance, trace_id, span_id, "Generated new trace context");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl TraceLog for NoopLog {
    fn log(&self, _instance: &str, _event: &TraceEvent<'_>) {}
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_filter` when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
