//! Status classification of free-text control program output
//!
//! The control program has no structured output, so status is derived from
//! keywords. Running keywords are checked first: text containing both kinds
//! classifies as Running. Note that "inactive" contains "active", so it
//! classifies as Running as well.

use crate::types::ServiceStatus;

const RUNNING_KEYWORDS: &[&str] = &["running", "active"];
const STOPPED_KEYWORDS: &[&str] = &["stopped", "inactive"];

/// Derives a [`ServiceStatus`] from the raw output of a status query.
///
/// Implementations must be total: any input, including empty or garbage
/// text, maps to some status.
pub trait StatusClassifier {
    fn classify(&self, raw_output: &str) -> ServiceStatus;
}

/// Case-insensitive keyword heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl StatusClassifier for KeywordClassifier {
    fn classify(&self, raw_output: &str) -> ServiceStatus {
        classify(raw_output)
    }
}

/// Classify status output using [`KeywordClassifier`] rules
pub fn classify(raw_output: &str) -> ServiceStatus {
    let text = raw_output.to_lowercase();

    if RUNNING_KEYWORDS.iter().any(|k| text.contains(k)) {
        ServiceStatus::Running
    } else if STOPPED_KEYWORDS.iter().any(|k| text.contains(k)) {
        ServiceStatus::Stopped
    } else {
        ServiceStatus::Unknown
    }
}
