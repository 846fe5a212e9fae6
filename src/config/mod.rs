//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! plugin config document (TOML / JSON)
//!     → loader.rs (parse & deserialize)
//!     → Config (immutable)
//!     → captured by the resolver at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the middleware is built
//! - All fields have defaults so an empty document is valid

pub mod loader;
pub mod schema;

pub use loader::{parse_config, ConfigError, ConfigFormat};
pub use schema::{Config, MissingTracePolicy};
