//! Configuration schema definitions.
//!
//! The middleware is configured once per chain position. The record is
//! small on purpose: everything it does is driven by request headers.

use serde::{Deserialize, Serialize};

/// Middleware configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Reserved option. Has no effect on resolution.
    pub dummy: bool,

    /// What to do when a request carries neither `X-Request-ID` nor `traceparent`.
    pub missing_trace: MissingTracePolicy,
}

impl Config {
    /// Configuration that synthesizes fresh identifiers for untraced requests.
    pub fn generating() -> Self {
        Self {
            missing_trace: MissingTracePolicy::Generate,
            ..Self::default()
        }
    }
}

/// Behaviour for requests without any trace headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTracePolicy {
    /// Forward the request without an identifier.
    #[default]
    Skip,

    /// Generate a trace id and span id, set `X-Request-ID` and a new `traceparent`.
    Generate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.dummy);
        assert_eq!(config.missing_trace, MissingTracePolicy::Skip);
    }

    #[test]
    fn test_generating_keeps_reserved_flag_off() {
        let config = Config::generating();
        assert!(!config.dummy);
        assert_eq!(config.missing_trace, MissingTracePolicy::Generate);
    }
}
