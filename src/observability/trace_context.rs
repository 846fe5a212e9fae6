//! W3C-style trace context support.
//!
//! # Responsibilities
//! - Match `traceparent` values and extract the trace id
//! - Generate fresh trace and span ids when a request has none
//!
//! # Design Decisions
//! - The grammar is matched loosely: any ASCII word characters, not only hex
//! - Generated ids are lowercase hex, so they always match the grammar
//! - Ids are correlation tokens, not secrets; a seeded PRNG is enough

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

/// `{version}-{trace-id}-{parent-id}-{flags}`, anchored on both ends.
const TRACEPARENT_PATTERN: &str = r"(?-u)^\w{2}-(\w{32})-\w{16}-\w{2}$";

/// Length of a trace id in hex characters.
pub const TRACE_ID_LEN: usize = 32;

/// Length of a span id in hex characters.
pub const SPAN_ID_LEN: usize = 16;

/// Compiled `traceparent` grammar.
#[derive(Debug, Clone)]
pub struct TraceParentMatcher {
    pattern: Regex,
}

impl TraceParentMatcher {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(TRACEPARENT_PATTERN)?,
        })
    }

    /// Returns the trace id group if `value` is a well-formed `traceparent`.
    pub fn trace_id<'a>(&self, value: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Build a `traceparent` value for freshly generated ids.
pub fn format_traceparent(trace_id: &str, span_id: &str) -> String {
    format!("00-{trace_id}-{span_id}-00")
}

/// Source of random trace and span ids.
///
/// Owned by the resolver and shared across concurrent requests; the lock
/// is held only while drawing a number.
#[derive(Debug)]
pub struct TraceIdGenerator {
    rng: Mutex<StdRng>,
}

impl TraceIdGenerator {
    /// Generator seeded from the wall clock.
    pub fn from_time() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::with_seed(time_seed(since_epoch))
    }

    /// Deterministic generator, mainly for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// 32 lowercase hex characters.
    ///
    /// # Panics
    ///
    /// Panics if the underlying generator fails. An id is never returned
    /// short or empty.
    pub fn trace_id(&self) -> String {
        let id: u128 = self.rng().gen();
        format!("{id:032x}")
    }

    /// 16 lowercase hex characters.
    pub fn span_id(&self) -> String {
        let id: u64 = self.rng().gen();
        format!("{id:016x}")
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic elsewhere cannot leave the PRNG state half-written.
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Nanoseconds since the epoch, or 0 once they no longer fit a `u64`.
fn time_seed(since_epoch: Duration) -> u64 {
    u64::try_from(since_epoch.as_nanos()).unwrap_or_default()
}

impl Default for TraceIdGenerator {
    fn default() -> Self {
        Self::from_time()
    }
}
