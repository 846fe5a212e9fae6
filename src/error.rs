//! Crate error type.
//!
//! Only construction can fail. Once built, the middleware absorbs every
//! request-level condition and always forwards.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("middleware instance name must not be empty")]
    EmptyName,

    #[error("invalid traceparent pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
