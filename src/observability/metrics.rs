//! Metrics collection.
//!
//! # Metrics
//! - `request_trace_resolutions_total` (counter): resolutions by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; the host installs the exporter
//! - Labels are static strings, no per-request allocation

/// Counter name for resolved requests.
pub const RESOLUTIONS_TOTAL: &str = "request_trace_resolutions_total";

/// Count one resolved request.
pub fn record_resolution(outcome: &'static str) {
    metrics::counter!(RESOLUTIONS_TOTAL, "outcome" => outcome).increment(1);
}
