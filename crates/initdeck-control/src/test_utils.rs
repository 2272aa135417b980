//! Test utilities for discovery and execution
//!
//! Provides a temporary service directory builder and a scripted
//! [`ServiceController`] that never spawns processes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use initdeck_core::{CommandResult, ServiceAction};
use tempfile::TempDir;

use crate::executor::ServiceController;

/// A temporary service directory, removed on drop.
pub struct ServiceDirFixture {
    dir: TempDir,
}

impl ServiceDirFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp service dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an executable (0755) init script with placeholder content
    pub fn executable(&self, name: &str) -> PathBuf {
        self.script(name, "#!/bin/sh\n")
    }

    /// Create an executable (0755) init script with the given content
    pub fn script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write script");
        set_mode(&path, 0o755);
        path
    }

    /// Create a file with an explicit mode
    pub fn file_with_mode(&self, name: &str, mode: u32) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, "").expect("write file");
        set_mode(&path, mode);
        path
    }

    pub fn subdir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(&path).expect("create subdir");
        path
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).expect("remove file");
    }
}

impl Default for ServiceDirFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).expect("chmod");
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) {}

#[derive(Debug, Clone)]
enum Scripted {
    Succeed(String),
    Fail { output: String, detail: String },
}

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<(String, ServiceAction), Scripted>,
    calls: Vec<(String, ServiceAction)>,
}

/// Fake controller answering from a script and recording every call.
///
/// Unscripted calls succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    script: Arc<Mutex<Script>>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful invocation printing `output`
    pub fn succeed(self, service: &str, action: ServiceAction, output: &str) -> Self {
        self.insert(service, action, Scripted::Succeed(output.to_string()));
        self
    }

    /// Script a failed invocation with `detail` as its error
    pub fn fail(self, service: &str, action: ServiceAction, output: &str, detail: &str) -> Self {
        self.insert(
            service,
            action,
            Scripted::Fail {
                output: output.to_string(),
                detail: detail.to_string(),
            },
        );
        self
    }

    /// Every `(service, action)` executed so far, in order
    pub fn calls(&self) -> Vec<(String, ServiceAction)> {
        self.script.lock().expect("script lock").calls.clone()
    }

    fn insert(&self, service: &str, action: ServiceAction, scripted: Scripted) {
        self.script
            .lock()
            .expect("script lock")
            .responses
            .insert((service.to_string(), action), scripted);
    }
}

impl ServiceController for ScriptedController {
    async fn execute(&self, service_name: &str, action: ServiceAction) -> CommandResult {
        let scripted = {
            let mut script = self.script.lock().expect("script lock");
            script.calls.push((service_name.to_string(), action));
            script
                .responses
                .get(&(service_name.to_string(), action))
                .cloned()
        };

        match scripted {
            Some(Scripted::Succeed(output)) => CommandResult::success(service_name, action, output),
            Some(Scripted::Fail { output, detail }) => {
                CommandResult::failure(service_name, action, output, detail).with_exit_code(Some(1))
            }
            None => CommandResult::success(service_name, action, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_controller_records_calls() {
        let controller = ScriptedController::new()
            .succeed("apache2", ServiceAction::Status, "apache2 is running")
            .fail("cron", ServiceAction::Start, "", "permission denied");

        let ok = controller.execute("apache2", ServiceAction::Status).await;
        let failed = controller.execute("cron", ServiceAction::Start).await;
        let unscripted = controller.execute("ssh", ServiceAction::Stop).await;

        assert!(ok.succeeded);
        assert_eq!(ok.combined_output, "apache2 is running");
        assert!(!failed.succeeded);
        assert_eq!(failed.error_detail.as_deref(), Some("permission denied"));
        assert!(unscripted.succeeded);
        assert_eq!(
            controller.calls(),
            vec![
                ("apache2".to_string(), ServiceAction::Status),
                ("cron".to_string(), ServiceAction::Start),
                ("ssh".to_string(), ServiceAction::Stop),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fixture_creates_executables() {
        let fixture = ServiceDirFixture::new();
        let path = fixture.executable("cron");
        assert!(path.exists());
        fixture.remove("cron");
        assert!(!path.exists());
    }
}
