//! Service directory scanning
//!
//! A service is any entry of the service directory that is not a directory
//! and has at least one execute bit set. Symlinks are followed, so a link
//! to an executable script counts and a dangling link is skipped.

use std::fs::Metadata;
use std::path::Path;

use initdeck_core::prelude::*;
use initdeck_core::ServiceRecord;

/// Conventional SysV init script location
pub const DEFAULT_SERVICE_DIR: &str = "/etc/init.d";

const EXECUTE_BITS: u32 = 0o111;

/// Best-effort descriptive metadata for a service script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub file_size: Option<u64>,
    pub permissions: Option<String>,
}

/// List service names in `directory`, sorted ascending.
///
/// Fails with [`Error::DirectoryUnreadable`] when the directory cannot be
/// opened or listed. Individual entries whose metadata cannot be read are
/// skipped.
pub fn scan(directory: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(directory)
        .map_err(|e| Error::directory_unreadable(directory, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::directory_unreadable(directory, e))?;
        let path = entry.path();

        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_dir() || !is_executable(&metadata) {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("Skipping non UTF-8 entry {:?}", raw),
        }
    }

    names.sort();
    debug!(
        "Scanned {}: {} service(s)",
        directory.display(),
        names.len()
    );
    Ok(names)
}

/// Scan `directory` and build a record (status Unknown) for every service
pub fn catalog(directory: &Path) -> Result<Vec<ServiceRecord>> {
    let names = scan(directory)?;
    Ok(names
        .into_iter()
        .map(|name| {
            let mut record = ServiceRecord::new(name, directory);
            let metadata = service_metadata(&record.path);
            record.file_size = metadata.file_size;
            record.permissions = metadata.permissions;
            record
        })
        .collect())
}

/// Look up size and mode string for a service script.
///
/// Never fails: fields are `None` when the lookup does.
pub fn service_metadata(path: &Path) -> ServiceMetadata {
    match std::fs::metadata(path) {
        Ok(metadata) => ServiceMetadata {
            file_size: Some(metadata.len()),
            permissions: Some(permission_string(mode_of(&metadata), metadata.is_dir())),
        },
        Err(e) => {
            debug!("Metadata lookup failed for {}: {}", path.display(), e);
            ServiceMetadata::default()
        }
    }
}

/// Render mode bits `ls` style, e.g. `-rwxr-xr-x`
pub fn permission_string(mode: u32, is_dir: bool) -> String {
    let mut out = String::with_capacity(10);
    out.push(if is_dir { 'd' } else { '-' });

    // (read, write, execute, special bit, special char when x set)
    let triads = [
        (0o400, 0o200, 0o100, 0o4000, 's'),
        (0o040, 0o020, 0o010, 0o2000, 's'),
        (0o004, 0o002, 0o001, 0o1000, 't'),
    ];

    for (r, w, x, special, special_char) in triads {
        out.push(if mode & r != 0 { 'r' } else { '-' });
        out.push(if mode & w != 0 { 'w' } else { '-' });
        let exec = mode & x != 0;
        let special_set = mode & special != 0;
        out.push(match (exec, special_set) {
            (true, true) => special_char,
            (false, true) => special_char.to_ascii_uppercase(),
            (true, false) => 'x',
            (false, false) => '-',
        });
    }

    out
}

fn is_executable(metadata: &Metadata) -> bool {
    mode_of(metadata) & EXECUTE_BITS != 0
}

#[cfg(unix)]
fn mode_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn mode_of(_metadata: &Metadata) -> u32 {
    0
}
