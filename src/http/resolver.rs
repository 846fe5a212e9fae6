//! Request identifier resolution.
//!
//! Decides the `X-Request-ID` of a request from its headers:
//!
//! 1. a non-empty `X-Request-ID` is kept as is
//! 2. otherwise the trace id of a well-formed `traceparent` becomes the id
//! 3. a malformed `traceparent` leaves the request without an id
//! 4. with no `traceparent` at all, [`MissingTracePolicy`] decides
//!
//! An `X-Request-ID` header whose values are all empty counts as missing.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue};

use crate::config::{Config, MissingTracePolicy};
use crate::error::Error;
use crate::http::request::{RequestId, TRACEPARENT, X_REQUEST_ID};
use crate::observability::logging::{TraceEvent, TraceLog};
use crate::observability::trace_context::{
    format_traceparent, TraceIdGenerator, TraceParentMatcher,
};

/// Which branch of the policy produced the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request already carried an id.
    Existing(HeaderValue),
    /// The id was extracted from `traceparent`.
    Extracted(HeaderValue),
    /// `traceparent` was present but malformed; no id was set.
    Malformed,
    /// Fresh ids were generated and both headers set.
    Generated {
        request_id: HeaderValue,
        traceparent: HeaderValue,
    },
    /// No trace headers and generation is disabled.
    Absent,
}

impl Resolution {
    /// The request id the request carries after resolution.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::Existing(v) | Self::Extracted(v) => Some(RequestId::new(v.clone())),
            Self::Generated { request_id, .. } => Some(RequestId::new(request_id.clone())),
            Self::Malformed | Self::Absent => None,
        }
    }

    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Existing(_) => "existing",
            Self::Extracted(_) => "extracted",
            Self::Malformed => "malformed",
            Self::Generated { .. } => "generated",
            Self::Absent => "absent",
        }
    }
}

/// Resolves request ids for one middleware instance.
pub struct Resolver {
    name: String,
    policy: MissingTracePolicy,
    matcher: TraceParentMatcher,
    generator: Arc<TraceIdGenerator>,
    log: Arc<dyn TraceLog>,
}

impl Resolver {
    pub fn new(
        name: impl Into<String>,
        config: &Config,
        generator: Arc<TraceIdGenerator>,
        log: Arc<dyn TraceLog>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self {
            name,
            policy: config.missing_trace,
            matcher: TraceParentMatcher::new()?,
            generator,
            log,
        })
    }

    /// Instance name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> MissingTracePolicy {
        self.policy
    }

    /// Apply the policy to `headers` in place.
    pub fn resolve(&self, headers: &mut HeaderMap) -> Resolution {
        self.emit(TraceEvent::HeadersReceived(headers));

        if let Some(existing) = headers
            .get_all(X_REQUEST_ID)
            .iter()
            .find(|value| !value.is_empty())
        {
            let existing = existing.clone();
            self.emit(TraceEvent::RequestIdPresent(&String::from_utf8_lossy(
                existing.as_bytes(),
            )));
            return Resolution::Existing(existing);
        }
        self.emit(TraceEvent::RequestIdMissing);

        match headers.get(TRACEPARENT).cloned() {
            Some(traceparent) => {
                let raw = String::from_utf8_lossy(traceparent.as_bytes()).into_owned();
                self.emit(TraceEvent::TraceParentFound(&raw));

                let trace_id = traceparent
                    .to_str()
                    .ok()
                    .and_then(|value| self.matcher.trace_id(value));

                match trace_id {
                    Some(trace_id) => {
                        self.emit(TraceEvent::TraceIdExtracted(trace_id));
                        let value = HeaderValue::from_str(trace_id)
                            .expect("trace id is made of ASCII word characters");
                        headers.insert(X_REQUEST_ID, value.clone());
                        Resolution::Extracted(value)
                    }
                    None => {
                        self.emit(TraceEvent::TraceParentMalformed(&raw));
                        Resolution::Malformed
                    }
                }
            }
            None => match self.policy {
                MissingTracePolicy::Skip => {
                    self.emit(TraceEvent::TraceParentMissing);
                    Resolution::Absent
                }
                MissingTracePolicy::Generate => self.generate(headers),
            },
        }
    }

    fn generate(&self, headers: &mut HeaderMap) -> Resolution {
        let trace_id = self.generator.trace_id();
        let span_id = self.generator.span_id();
        self.emit(TraceEvent::Generated {
            trace_id: &trace_id,
            span_id: &span_id,
        });

        let request_id =
            HeaderValue::from_str(&trace_id).expect("hex is a valid header value");
        let traceparent = HeaderValue::from_str(&format_traceparent(&trace_id, &span_id))
            .expect("hex is a valid header value");

        headers.insert(X_REQUEST_ID, request_id.clone());
        headers.insert(TRACEPARENT, traceparent.clone());

        Resolution::Generated {
            request_id,
            traceparent,
        }
    }

    fn emit(&self, event: TraceEvent<'_>) {
        self.log.log(&self.name, &event);
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
