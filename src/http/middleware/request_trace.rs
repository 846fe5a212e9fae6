//! Request trace middleware.
//!
//! Guarantees a request id before the request reaches the next service.
//! The middleware only touches request headers and extensions: it never
//! writes to the response and never short-circuits the chain.

use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use http::Request;
use tower::{Layer, Service};

use crate::config::{parse_config, Config, ConfigFormat};
use crate::error::Error;
use crate::http::resolver::Resolver;
use crate::observability::logging::{TraceLog, TracingLog};
use crate::observability::metrics;
use crate::observability::trace_context::TraceIdGenerator;

/// Collaborators handed to the middleware at construction.
#[derive(Clone)]
pub struct Context {
    log: Arc<dyn TraceLog>,
    generator: Arc<TraceIdGenerator>,
}

impl Context {
    /// `tracing` log sink and a time-seeded generator.
    pub fn new() -> Self {
        Self {
            log: Arc::new(TracingLog),
            generator: Arc::new(TraceIdGenerator::from_time()),
        }
    }

    pub fn with_log(mut self, log: Arc<dyn TraceLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_generator(mut self, generator: TraceIdGenerator) -> Self {
        self.generator = Arc::new(generator);
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the middleware in front of `next`.
///
/// `name` identifies this instance in logs; it must not be blank.
pub fn create<S>(
    ctx: &Context,
    next: S,
    config: &Config,
    name: &str,
) -> Result<RequestTrace<S>, Error> {
    Ok(RequestTraceLayer::new(ctx, config, name)?.layer(next))
}

/// [`Layer`] applying [`RequestTrace`] to services.
#[derive(Debug, Clone)]
pub struct RequestTraceLayer {
    resolver: Arc<Resolver>,
}

impl RequestTraceLayer {
    pub fn new(ctx: &Context, config: &Config, name: impl Into<String>) -> Result<Self, Error> {
        let resolver = Resolver::new(
            name,
            config,
            Arc::clone(&ctx.generator),
            Arc::clone(&ctx.log),
        )?;

        Ok(Self {
            resolver: Arc::new(resolver),
        })
    }

    /// Build from a plugin configuration document.
    pub fn from_document(
        ctx: &Context,
        source: &str,
        format: ConfigFormat,
        name: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = parse_config(source, format)?;
        Self::new(ctx, &config, name)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

impl<S> Layer<S> for RequestTraceLayer {
    type Service = RequestTrace<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTrace {
            inner,
            resolver: Arc::clone(&self.resolver),
        }
    }
}

/// Middleware service that resolves the request id, then calls the inner service.
#[derive(Debug, Clone)]
pub struct RequestTrace<S> {
    inner: S,
    resolver: Arc<Resolver>,
}

impl<S> RequestTrace<S> {
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> Service<Request<B>> for RequestTrace<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let resolution = self.resolver.resolve(req.headers_mut());
        metrics::record_resolution(resolution.outcome());

        if let Some(request_id) = resolution.request_id() {
            req.extensions_mut().insert(request_id);
        }

        self.inner.call(req)
    }
}
