//! # initdeck-control - Service Discovery and Control
//!
//! Talks to the outside world on behalf of the service session: lists the
//! service directory and runs the privileged control program.
//!
//! Depends on [`initdeck_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Discovery
//! - [`scan()`] - Sorted names of executable, non-directory entries
//! - [`catalog()`] - Scan plus per-service metadata
//! - [`service_metadata()`], [`permission_string()`] - Best-effort file metadata
//!
//! ### Execution
//! - [`ServiceController`] - Async seam for running lifecycle commands
//! - [`ControlProgram`] - `sudo service <name> <action>` with a bounded wait
//!
//! ### Privilege
//! - [`is_elevated()`] - Whether the process runs with effective uid 0
//! - [`program_available()`] - Whether the control program is on `PATH`

pub mod executor;
pub mod privilege;
pub mod scanner;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use executor::{
    ControlProgram, LocalServiceController, ServiceController, DEFAULT_TIMEOUT,
};
pub use privilege::{is_elevated, program_available};
pub use scanner::{
    catalog, permission_string, scan, service_metadata, ServiceMetadata, DEFAULT_SERVICE_DIR,
};
