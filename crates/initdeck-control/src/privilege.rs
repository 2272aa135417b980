//! Privilege and tool availability probes
//!
//! Advisory only: nothing here prevents a command from being attempted.

/// Whether the process runs with effective uid 0
#[cfg(unix)]
pub fn is_elevated() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}

/// Whether `program` resolves on `PATH` (or is an existing path)
pub fn program_available(program: &str) -> bool {
    which::which(program)
        .inspect_err(|e| tracing::debug!("{} not found: {}", program, e))
        .is_ok()
}
