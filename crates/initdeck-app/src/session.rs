//! Service session: catalog, selection, last result and the busy flag
//!
//! The session is the only owner of service state. Presentation code reads it
//! through borrowing accessors and changes it through [`crate::Message`]
//! intents handled in `handler::update`.

use std::collections::HashMap;
use std::path::Path;

use initdeck_core::prelude::*;
use initdeck_core::{CommandResult, ServiceAction, ServiceRecord, ServiceStatus, StatusClassifier};

/// Who asked for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    /// Explicit operator request; its result becomes the last result
    Operator,
    /// Status query issued by the session itself (after a lifecycle action
    /// or on selection); only updates the record's status
    Implicit,
}

/// A command handed to the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub service_name: String,
    pub action: ServiceAction,
    pub origin: CommandOrigin,
}

impl PendingCommand {
    fn implicit_status(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            action: ServiceAction::Status,
            origin: CommandOrigin::Implicit,
        }
    }

    /// Short label such as `restart apache2`
    pub fn label(&self) -> String {
        format!("{} {}", self.action, self.service_name)
    }
}

/// Session state for one run of the dashboard
#[derive(Debug, Default)]
pub struct ServiceSession {
    catalog: Vec<ServiceRecord>,
    selected: Option<usize>,
    last_result: Option<CommandResult>,
    in_flight: Option<PendingCommand>,
    last_error: Option<String>,
}

impl ServiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over an already built catalog, first entry selected
    pub fn with_catalog(records: Vec<ServiceRecord>) -> Self {
        let mut session = Self::new();
        session.replace_catalog(records);
        session
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &[ServiceRecord] {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ServiceRecord> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    pub fn record(&self, name: &str) -> Option<&ServiceRecord> {
        self.catalog.iter().find(|r| r.name == name)
    }

    pub fn last_result(&self) -> Option<&CommandResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&PendingCommand> {
        self.in_flight.as_ref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ─────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────

    /// Rebuild the catalog from `directory`.
    ///
    /// On failure the catalog and selection are left untouched.
    pub fn refresh(&mut self, directory: &Path) -> Result<()> {
        let records = initdeck_control::catalog(directory)?;
        self.replace_catalog(records);
        info!(
            "Catalog refreshed from {}: {} service(s)",
            directory.display(),
            self.catalog.len()
        );
        Ok(())
    }

    fn replace_catalog(&mut self, mut records: Vec<ServiceRecord>) {
        let known: HashMap<String, ServiceStatus> = self
            .catalog
            .drain(..)
            .map(|r| (r.name, r.status))
            .collect();

        for record in &mut records {
            if let Some(status) = known.get(&record.name) {
                record.status = *status;
            }
        }
        self.catalog = records;

        self.selected = match (self.selected, self.catalog.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    /// Select `index`; returns `false` (and changes nothing) when out of range
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Move down one entry, wrapping to the top
    pub fn select_next(&mut self) -> bool {
        match self.selected {
            Some(i) => self.select((i + 1) % self.catalog.len().max(1)),
            None => self.select_first(),
        }
    }

    /// Move up one entry, wrapping to the bottom
    pub fn select_previous(&mut self) -> bool {
        match self.selected {
            Some(0) => self.select_last(),
            Some(i) => self.select(i - 1),
            None => self.select_last(),
        }
    }

    pub fn select_first(&mut self) -> bool {
        self.select(0)
    }

    pub fn select_last(&mut self) -> bool {
        match self.catalog.len() {
            0 => false,
            len => self.select(len - 1),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────

    /// Mark an operator command against the selected service as in flight
    pub fn begin_command(&mut self, action: ServiceAction) -> Result<PendingCommand> {
        self.begin(action, CommandOrigin::Operator)
    }

    /// Mark an implicit status query of the selected service as in flight
    pub fn begin_status_query(&mut self) -> Result<PendingCommand> {
        self.begin(ServiceAction::Status, CommandOrigin::Implicit)
    }

    fn begin(&mut self, action: ServiceAction, origin: CommandOrigin) -> Result<PendingCommand> {
        if self.in_flight.is_some() {
            return Err(Error::CommandInFlight);
        }
        let record = self.selected_record().ok_or(Error::NoServiceSelected)?;

        let pending = PendingCommand {
            service_name: record.name.clone(),
            action,
            origin,
        };
        self.in_flight = Some(pending.clone());
        Ok(pending)
    }

    /// Apply a finished command.
    ///
    /// Returns the follow-up status query when a lifecycle action succeeded
    /// and `requery_after_action` is set; the session stays busy until that
    /// query completes too.
    pub fn complete_command<C>(
        &mut self,
        result: CommandResult,
        classifier: &C,
        requery_after_action: bool,
    ) -> Option<PendingCommand>
    where
        C: StatusClassifier + ?Sized,
    {
        let origin = match self.in_flight.take() {
            Some(pending) => pending.origin,
            None => {
                warn!("Result without a command in flight: {}", result.summary());
                CommandOrigin::Operator
            }
        };

        let index = self
            .catalog
            .iter()
            .position(|r| r.name == result.service_name);
        if index.is_none() {
            debug!("{} is no longer in the catalog", result.service_name);
        }

        if let Some(i) = index {
            if result.succeeded && result.action == ServiceAction::Status {
                let status = classifier.classify(&result.combined_output);
                debug!("{} classified as {}", result.service_name, status);
                self.catalog[i].status = status;
            }
        }

        let follow_up = (index.is_some()
            && requery_after_action
            && result.succeeded
            && result.action.is_mutating())
        .then(|| PendingCommand::implicit_status(&result.service_name));

        if origin == CommandOrigin::Operator {
            self.last_result = Some(result);
        }

        self.in_flight = follow_up.clone();
        follow_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use initdeck_control::test_utils::ServiceDirFixture;
    use initdeck_core::KeywordClassifier;

    fn session_with(names: &[&str]) -> ServiceSession {
        let dir = Path::new("/etc/init.d");
        ServiceSession::with_catalog(names.iter().map(|n| ServiceRecord::new(*n, dir)).collect())
    }

    fn status_ok(name: &str, output: &str) -> CommandResult {
        CommandResult::success(name, ServiceAction::Status, output)
    }

    // ─────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn test_refresh_loads_sorted_catalog_and_selects_first() {
        let fixture = ServiceDirFixture::new();
        fixture.executable("cron");
        fixture.executable("apache2");
        let mut session = ServiceSession::new();

        session.refresh(fixture.path()).unwrap();

        let names: Vec<_> = session.catalog().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["apache2", "cron"]);
        assert_eq!(session.selected(), Some(0));
        assert!(session
            .catalog()
            .iter()
            .all(|r| r.status == ServiceStatus::Unknown));
    }

    #[cfg(unix)]
    #[test]
    fn test_refresh_shrink_clamps_selection() {
        let fixture = ServiceDirFixture::new();
        fixture.executable("a");
        fixture.executable("b");
        fixture.executable("c");
        let mut session = ServiceSession::new();
        session.refresh(fixture.path()).unwrap();
        session.select(2);

        fixture.remove("c");
        fixture.remove("b");
        session.refresh(fixture.path()).unwrap();

        assert_eq!(session.selected(), Some(0));
        assert_eq!(session.selected_record().unwrap().name, "a");
    }

    #[cfg(unix)]
    #[test]
    fn test_refresh_to_empty_clears_selection() {
        let fixture = ServiceDirFixture::new();
        fixture.executable("a");
        let mut session = ServiceSession::new();
        session.refresh(fixture.path()).unwrap();

        fixture.remove("a");
        session.refresh(fixture.path()).unwrap();

        assert!(session.is_empty());
        assert_eq!(session.selected(), None);
        assert!(session.selected_record().is_none());
    }

    #[test]
    fn test_refresh_failure_keeps_catalog() {
        let fixture = ServiceDirFixture::new();
        let mut session = session_with(&["apache2", "cron"]);
        session.select(1);

        let err = session.refresh(&fixture.path().join("missing")).unwrap_err();

        assert!(matches!(err, Error::DirectoryUnreadable { .. }));
        assert_eq!(session.len(), 2);
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_replace_catalog_carries_over_known_status() {
        let dir = Path::new("/etc/init.d");
        let mut session = session_with(&["apache2", "cron"]);
        session.complete_command(status_ok("apache2", "running"), &KeywordClassifier, true);

        session.replace_catalog(vec![
            ServiceRecord::new("apache2", dir),
            ServiceRecord::new("nginx", dir),
        ]);

        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Running);
        assert_eq!(session.record("nginx").unwrap().status, ServiceStatus::Unknown);
        assert!(session.record("cron").is_none());
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut session = session_with(&["a", "b"]);
        session.select(1);

        assert!(!session.select(2));
        assert!(!session.select(usize::MAX));
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_select_on_empty_catalog() {
        let mut session = ServiceSession::new();
        assert!(!session.select(0));
        assert!(!session.select_next());
        assert!(!session.select_previous());
        assert!(!session.select_last());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_select_next_and_previous_wrap() {
        let mut session = session_with(&["a", "b", "c"]);
        assert_eq!(session.selected(), Some(0));

        session.select_previous();
        assert_eq!(session.selected(), Some(2));

        session.select_next();
        assert_eq!(session.selected(), Some(0));

        session.select_next();
        assert_eq!(session.selected(), Some(1));

        session.select_last();
        assert_eq!(session.selected(), Some(2));
        session.select_first();
        assert_eq!(session.selected(), Some(0));
    }

    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_begin_command_without_selection() {
        let mut session = ServiceSession::new();

        let err = session.begin_command(ServiceAction::Start).unwrap_err();

        assert!(matches!(err, Error::NoServiceSelected));
        assert!(session.last_result().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_second_command_while_busy_is_rejected() {
        let mut session = session_with(&["apache2"]);

        let first = session.begin_command(ServiceAction::Restart).unwrap();
        let err = session.begin_command(ServiceAction::Status).unwrap_err();

        assert_eq!(first.service_name, "apache2");
        assert_eq!(first.action, ServiceAction::Restart);
        assert_eq!(first.origin, CommandOrigin::Operator);
        assert!(matches!(err, Error::CommandInFlight));
        assert_eq!(session.in_flight(), Some(&first));
    }

    #[test]
    fn test_status_result_classifies_and_records() {
        let mut session = session_with(&["apache2", "cron"]);
        session.begin_command(ServiceAction::Status).unwrap();

        let follow_up = session.complete_command(
            status_ok("apache2", "apache2 is running"),
            &KeywordClassifier,
            true,
        );

        assert!(follow_up.is_none());
        assert!(!session.is_busy());
        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Running);
        let last = session.last_result().unwrap();
        assert!(last.succeeded);
        assert_eq!(last.service_name, "apache2");
    }

    #[test]
    fn test_failed_status_leaves_status_unchanged() {
        let mut session = session_with(&["apache2"]);
        session.begin_command(ServiceAction::Status).unwrap();
        session.complete_command(status_ok("apache2", "stopped"), &KeywordClassifier, true);

        session.begin_command(ServiceAction::Status).unwrap();
        session.complete_command(
            CommandResult::failure(
                "apache2",
                ServiceAction::Status,
                "apache2 is running",
                "exit status: 1: permission denied",
            ),
            &KeywordClassifier,
            true,
        );

        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Stopped);
        let last = session.last_result().unwrap();
        assert!(!last.succeeded);
        assert!(last.error_detail.as_deref().unwrap().contains("permission denied"));
    }

    #[test]
    fn test_successful_action_requeries_status() {
        let mut session = session_with(&["apache2"]);
        session.begin_command(ServiceAction::Start).unwrap();

        let follow_up = session
            .complete_command(
                CommandResult::success("apache2", ServiceAction::Start, "Starting apache2"),
                &KeywordClassifier,
                true,
            )
            .unwrap();

        assert_eq!(follow_up.action, ServiceAction::Status);
        assert_eq!(follow_up.origin, CommandOrigin::Implicit);
        assert!(session.is_busy());
        assert_eq!(session.last_result().unwrap().action, ServiceAction::Start);

        let done = session.complete_command(
            status_ok("apache2", "apache2 is running"),
            &KeywordClassifier,
            true,
        );

        assert!(done.is_none());
        assert!(!session.is_busy());
        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Running);
        // implicit query does not replace the operator's result
        assert_eq!(session.last_result().unwrap().action, ServiceAction::Start);
    }

    #[test]
    fn test_requery_disabled() {
        let mut session = session_with(&["apache2"]);
        session.begin_command(ServiceAction::Stop).unwrap();

        let follow_up = session.complete_command(
            CommandResult::success("apache2", ServiceAction::Stop, ""),
            &KeywordClassifier,
            false,
        );

        assert!(follow_up.is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failed_action_does_not_requery() {
        let mut session = session_with(&["apache2"]);
        session.begin_command(ServiceAction::Restart).unwrap();

        let follow_up = session.complete_command(
            CommandResult::failure("apache2", ServiceAction::Restart, "", "exit status: 1"),
            &KeywordClassifier,
            true,
        );

        assert!(follow_up.is_none());
        assert!(!session.is_busy());
        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Unknown);
    }

    #[test]
    fn test_result_for_vanished_service() {
        let dir = Path::new("/etc/init.d");
        let mut session = session_with(&["apache2", "cron"]);
        session.select(1);
        session.begin_command(ServiceAction::Start).unwrap();
        session.replace_catalog(vec![ServiceRecord::new("apache2", dir)]);

        let follow_up = session.complete_command(
            CommandResult::success("cron", ServiceAction::Start, ""),
            &KeywordClassifier,
            true,
        );

        assert!(follow_up.is_none());
        assert!(!session.is_busy());
        assert_eq!(session.last_result().unwrap().service_name, "cron");
        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Unknown);
    }

    #[test]
    fn test_implicit_status_query_keeps_last_result() {
        let mut session = session_with(&["apache2"]);

        let pending = session.begin_status_query().unwrap();
        assert_eq!(pending.origin, CommandOrigin::Implicit);
        session.complete_command(status_ok("apache2", "inactive (dead)"), &KeywordClassifier, true);

        assert!(session.last_result().is_none());
        // "inactive" contains "active", which takes precedence
        assert_eq!(session.record("apache2").unwrap().status, ServiceStatus::Running);
    }

    #[test]
    fn test_pending_command_label() {
        let pending = PendingCommand {
            service_name: "apache2".to_string(),
            action: ServiceAction::Restart,
            origin: CommandOrigin::Operator,
        };
        assert_eq!(pending.label(), "restart apache2");
    }
}
