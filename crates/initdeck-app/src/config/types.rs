//! Configuration types for initdeck
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ServiceSettings` - Where services are discovered and how selection behaves
//! - `ControlSettings` - How the control program is invoked

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use initdeck_control::{ControlProgram, DEFAULT_SERVICE_DIR};

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub services: ServiceSettings,

    #[serde(default)]
    pub control: ControlSettings,
}

/// Service discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSettings {
    /// Directory scanned for init scripts
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Query status when the selection lands on a service with unknown status
    #[serde(default = "default_true")]
    pub status_on_select: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            status_on_select: true,
        }
    }
}

/// Control program settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlSettings {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before `<service> <action>`
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Query status after a successful start/stop/restart
    #[serde(default = "default_true")]
    pub requery_after_action: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
            requery_after_action: true,
        }
    }
}

impl ControlSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Build the executor for these settings
    pub fn control_program(&self) -> ControlProgram {
        ControlProgram::new(self.program.clone(), self.args.clone()).with_timeout(self.timeout())
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_SERVICE_DIR)
}

fn default_program() -> String {
    "sudo".to_string()
}

fn default_args() -> Vec<String> {
    vec!["service".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
