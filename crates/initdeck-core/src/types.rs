//! Service domain types

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Last-known run state of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    /// Initial value, and what unparseable status output classifies as
    #[default]
    Unknown,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "Running",
            ServiceStatus::Stopped => "Stopped",
            ServiceStatus::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceStatus::Unknown)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle command understood by the control program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
    Status,
}

impl ServiceAction {
    /// All actions, in the order they are offered to the operator
    pub const ALL: [ServiceAction; 4] = [
        ServiceAction::Start,
        ServiceAction::Stop,
        ServiceAction::Restart,
        ServiceAction::Status,
    ];

    /// Argument passed to the control program
    pub fn as_arg(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
            ServiceAction::Status => "status",
        }
    }

    /// Capitalized label for menus and dialogs
    pub fn label(&self) -> &'static str {
        match self {
            ServiceAction::Start => "Start",
            ServiceAction::Stop => "Stop",
            ServiceAction::Restart => "Restart",
            ServiceAction::Status => "Status",
        }
    }

    /// Whether this action changes OS service state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ServiceAction::Status)
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for ServiceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(ServiceAction::Start),
            "stop" => Ok(ServiceAction::Stop),
            "restart" => Ok(ServiceAction::Restart),
            "status" => Ok(ServiceAction::Status),
            other => Err(format!("unknown action: {}", other)),
        }
    }
}

/// A service discovered in the service directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    /// File name in the service directory; unique within a catalog
    pub name: String,
    /// Absolute path of the init script
    pub path: PathBuf,
    pub status: ServiceStatus,
    /// Size in bytes, `None` if the lookup failed
    pub file_size: Option<u64>,
    /// Mode string such as `-rwxr-xr-x`, `None` if the lookup failed
    pub permissions: Option<String>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, directory: &Path) -> Self {
        let name = name.into();
        let path = directory.join(&name);
        Self {
            name,
            path,
            status: ServiceStatus::Unknown,
            file_size: None,
            permissions: None,
        }
    }

    pub fn size_display(&self) -> String {
        match self.file_size {
            Some(size) => format!("{} bytes", size),
            None => "Unknown".to_string(),
        }
    }

    pub fn permissions_display(&self) -> &str {
        self.permissions.as_deref().unwrap_or("Unknown")
    }
}

/// Outcome of one control program invocation
///
/// Failures of the external program are data here, never errors: the
/// session always gets something to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub service_name: String,
    pub action: ServiceAction,
    pub succeeded: bool,
    /// stdout and stderr, interleaved in write order
    pub combined_output: String,
    /// Present iff `succeeded` is false
    pub error_detail: Option<String>,
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub finished_at: DateTime<Local>,
}

impl CommandResult {
    pub fn success(
        service_name: impl Into<String>,
        action: ServiceAction,
        combined_output: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            action,
            succeeded: true,
            combined_output: combined_output.into(),
            error_detail: None,
            exit_code: Some(0),
            duration: Duration::ZERO,
            finished_at: Local::now(),
        }
    }

    pub fn failure(
        service_name: impl Into<String>,
        action: ServiceAction,
        combined_output: impl Into<String>,
        error_detail: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            action,
            succeeded: false,
            combined_output: combined_output.into(),
            error_detail: Some(error_detail.into()),
            exit_code: None,
            duration: Duration::ZERO,
            finished_at: Local::now(),
        }
    }

    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Short one-line summary, e.g. `restart apache2: ok (120ms)`
    pub fn summary(&self) -> String {
        let outcome = if self.succeeded { "ok" } else { "failed" };
        format!(
            "{} {}: {} ({}ms)",
            self.action,
            self.service_name,
            outcome,
            self.duration.as_millis()
        )
    }

    /// Full text shown to the operator, raw output plus error detail verbatim
    pub fn display_text(&self) -> String {
        if self.succeeded {
            format!(
                "Command '{} {}' executed successfully:\n{}",
                self.service_name, self.action, self.combined_output
            )
        } else {
            format!(
                "Error executing '{} {}':\n{}\n{}",
                self.service_name,
                self.action,
                self.combined_output,
                self.error_detail.as_deref().unwrap_or_default()
            )
        }
    }
}
