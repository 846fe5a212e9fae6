//! HTTP request handling.
//!
//! # Data Flow
//! ```text
//! inbound request (from the host server)
//!     → middleware/request_trace.rs (tower service)
//!     → resolver.rs (X-Request-ID / traceparent policy)
//!     → request.rs (header names, RequestId extension)
//!     → next handler in the chain
//! ```

pub mod middleware;
pub mod request;
pub mod resolver;

pub use middleware::{create, Context, RequestTrace, RequestTraceLayer};
pub use request::{RequestId, RequestIdExt, TRACEPARENT, X_REQUEST_ID};
pub use resolver::{Resolution, Resolver};
