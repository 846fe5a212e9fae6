//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver produces:
//!     → logging.rs (structured diagnostic events via an injected sink)
//!     → metrics.rs (resolution counters)
//! resolver consumes:
//!     → trace_context.rs (traceparent grammar, id generation)
//! ```

pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::{init_tracing, NoopLog, TraceEvent, TraceLog, TracingLog};
pub use trace_context::{TraceIdGenerator, TraceParentMatcher};
