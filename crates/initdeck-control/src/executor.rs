//! Control program execution
//!
//! Runs `<program> <args...> <service> <action>` (by default
//! `sudo service <service> <action>`) and packages the outcome as a
//! [`CommandResult`]. Launch failures, non-zero exits and timeouts are all
//! reported through the result, never as errors.
//!
//! stdout and stderr are captured together, interleaved in write order.

use std::io::SeekFrom;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::process::Command;

use initdeck_core::prelude::*;
use initdeck_core::{CommandResult, ServiceAction};

/// Default bound on a single control program invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Service lifecycle operations
///
/// The session only ever talks to this trait, so tests and alternative
/// backends can stand in for the real control program.
#[trait_variant::make(ServiceController: Send)]
pub trait LocalServiceController {
    /// Run `action` against `service_name` and wait for the outcome.
    ///
    /// Must not fail: every problem is captured in the returned result.
    async fn execute(&self, service_name: &str, action: ServiceAction) -> CommandResult;
}

/// The external, privileged control program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlProgram {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for ControlProgram {
    fn default() -> Self {
        Self {
            program: "sudo".to_string(),
            args: vec!["service".to_string()],
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ControlProgram {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full argv for one invocation, for logging and display
    pub fn command_line(&self, service_name: &str, action: ServiceAction) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(service_name.to_string());
        argv.push(action.as_arg().to_string());
        argv
    }
}

impl ServiceController for ControlProgram {
    async fn execute(&self, service_name: &str, action: ServiceAction) -> CommandResult {
        let started = Instant::now();
        info!(
            "Running: {}",
            self.command_line(service_name, action).join(" ")
        );

        let result = self
            .run(service_name, action)
            .await
            .with_duration(started.elapsed());

        debug!("{}", result.summary());
        result
    }
}

impl ControlProgram {
    async fn run(&self, service_name: &str, action: ServiceAction) -> CommandResult {
        let (capture, stdout, stderr) = match output_capture() {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Failed to create output capture: {}", e);
                return CommandResult::failure(
                    service_name,
                    action,
                    "",
                    format!("failed to capture output: {}", e),
                );
            }
        };

        // Dropping the child leaves it running; only the timeout kills it
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(service_name)
            .arg(action.as_arg())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to launch {}: {}", self.program, e);
                return CommandResult::failure(
                    service_name,
                    action,
                    "",
                    format!("failed to launch {}: {}", self.program, e),
                );
            }
        };

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                let output = read_capture(capture).await;
                let result = if status.success() {
                    CommandResult::success(service_name, action, output)
                } else {
                    let detail = failure_detail(status, &output);
                    CommandResult::failure(service_name, action, output, detail)
                };
                result.with_exit_code(status.code())
            }
            Ok(Err(e)) => CommandResult::failure(
                service_name,
                action,
                read_capture(capture).await,
                format!("failed waiting for {}: {}", self.program, e),
            ),
            Err(_) => {
                warn!(
                    "{} {} timed out after {}s, killing {}",
                    service_name,
                    action,
                    self.timeout.as_secs(),
                    self.program
                );
                if let Err(e) = child.start_kill() {
                    warn!("Failed to kill {}: {}", self.program, e);
                }
                CommandResult::failure(
                    service_name,
                    action,
                    read_capture(capture).await,
                    format!("timed out after {}s", self.timeout.as_secs()),
                )
            }
        }
    }
}

/// An anonymous file shared by the child's stdout and stderr.
///
/// Both handles share one file offset, so the output keeps the order in
/// which the child wrote it. A file rather than a pipe also means a child
/// we stopped waiting for never dies of SIGPIPE.
fn output_capture() -> std::io::Result<(std::fs::File, Stdio, Stdio)> {
    let file = tempfile::tempfile()?;
    let stdout = Stdio::from(file.try_clone()?);
    let stderr = Stdio::from(file.try_clone()?);
    Ok((file, stdout, stderr))
}

/// Everything written to the capture so far, lossily decoded
async fn read_capture(file: std::fs::File) -> String {
    let mut file = tokio::fs::File::from_std(file);
    let mut bytes = Vec::new();
    let read = match file.seek(SeekFrom::Start(0)).await {
        Ok(_) => file.read_to_end(&mut bytes).await.map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = read {
        warn!("Failed to read command output: {}", e);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Exit status plus the last non-empty output line, usually the error message
fn failure_detail(status: ExitStatus, output: &str) -> String {
    match output.lines().map(str::trim).rfind(|line| !line.is_empty()) {
        Some(line) => format!("{}: {}", status, line),
        None => status.to_string(),
    }
}
