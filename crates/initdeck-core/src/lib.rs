//! # initdeck-core - Core Domain Types
//!
//! Foundation crate for initdeck. Provides the service domain types, the
//! status classifier, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ServiceRecord`] - A discovered service with metadata and last-known status
//! - [`ServiceStatus`] - Running, Stopped, or Unknown
//! - [`ServiceAction`] - start, stop, restart, or status
//! - [`CommandResult`] - Outcome of one control program invocation
//!
//! ### Status Classification (`classify`)
//! - [`classify()`] - Keyword heuristic over free-text status output
//! - [`StatusClassifier`] - Seam for alternative status backends
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum organized by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use initdeck_core::prelude::*;
//! ```

pub mod classify;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all initdeck crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, warn};
}

pub use classify::{classify, KeywordClassifier, StatusClassifier};
pub use error::{Error, Result};
pub use types::{CommandResult, ServiceAction, ServiceRecord, ServiceStatus};
