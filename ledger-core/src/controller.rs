use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::close::{CloseSubscriber, CloseSubscriptions};
use crate::counter::{ChildWindowCounter, UnderflowPolicy};
use crate::error::{BackupError, LogicFault, WorkspaceError};
use crate::host::{
    AlwaysProceed, BackupReport, BackupService, CloseDecision, ConfirmCloseHook, NewEntryChoice,
    WindowHost,
};
use crate::navigation::{
    MenuAction, NavigationPanelController, PanelMetrics, PanelTransition, SectionId, TextMeasure,
};
use crate::registry::{OpenOutcome, SingletonViewRegistry};
use crate::view::{SingletonKind, TransientKind, ViewHandle, ViewKind, ViewParams};

/// Startup settings for a [`WorkspaceController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceOptions {
    pub metrics: PanelMetrics,
    pub underflow: UnderflowPolicy,
    /// Section shown at startup, `None` to start collapsed.
    pub start_section: Option<SectionId>,
    pub status_bar_visible: bool,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            metrics: PanelMetrics::default(),
            underflow: UnderflowPolicy::default(),
            start_section: Some(SectionId::Main),
            status_bar_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub windows_open: usize,
    pub visible: bool,
}

impl fmt::Display for StatusLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Windows Open: {}", self.windows_open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited,
    Cancelled,
}

/// Inbound events from the menu and status UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkspaceEvent {
    SectionActivated(SectionId),
    MenuAction(MenuAction),
    SingletonRequested(SingletonKind),
    TransientRequested(TransientKind, ViewParams),
    NewEntryChosen(Option<NewEntryChoice>),
    ChildClosed(ViewHandle),
    CloseAllRequested,
    ExitRequested,
    AboutRequested,
    StatusBarToggled,
}

/// Top-level orchestrator of the main window.
///
/// Owns the navigation panel, the singleton slots, the open-child counter and
/// the per-handle close subscribers. Every open goes through the counter and
/// every close, whether the user's or ours, comes back through
/// [`on_child_closed`](Self::on_child_closed).
pub struct WorkspaceController<H: WindowHost> {
    host: H,
    navigation: NavigationPanelController,
    registry: SingletonViewRegistry,
    counter: ChildWindowCounter,
    subscriptions: CloseSubscriptions,
    confirm_close: Box<dyn ConfirmCloseHook>,
    backup: Option<Box<dyn BackupService>>,
    status_bar_visible: bool,
    today: fn() -> NaiveDate,
}

impl<H: WindowHost> WorkspaceController<H> {
    pub fn new(
        host: H,
        options: WorkspaceOptions,
    ) -> Self {
        let mut workspace = Self {
            host,
            navigation: NavigationPanelController::new(options.metrics),
            registry: SingletonViewRegistry::new(),
            counter: ChildWindowCounter::new(options.underflow),
            subscriptions: CloseSubscriptions::new(),
            confirm_close: Box::new(AlwaysProceed),
            backup: None,
            status_bar_visible: options.status_bar_visible,
            today: || Local::now().date_naive(),
        };
        if let Some(section) = options.start_section {
            workspace.activate(section);
        }
        workspace
    }

    pub fn with_confirm_close_hook(
        mut self,
        hook: impl ConfirmCloseHook + 'static,
    ) -> Self {
        self.confirm_close = Box::new(hook);
        self
    }

    pub fn with_backup_service(
        mut self,
        service: impl BackupService + 'static,
    ) -> Self {
        self.backup = Some(Box::new(service));
        self
    }

    pub fn with_text_measure(
        mut self,
        measure: Box<dyn TextMeasure>,
    ) -> Self {
        self.navigation.set_measure(measure);
        let snapshot = self.navigation.snapshot();
        self.host.redraw_menu(&snapshot);
        self
    }

    /// Override the date given to pie charts opened from the menu.
    pub fn with_clock(
        mut self,
        today: fn() -> NaiveDate,
    ) -> Self {
        self.today = today;
        self
    }

    // ── navigation ─────────────────────────────────────────────────────

    pub fn activate(
        &mut self,
        section: SectionId,
    ) -> PanelTransition {
        let transition = self.navigation.activate(section);
        let snapshot = self.navigation.snapshot();
        self.host.redraw_menu(&snapshot);
        transition
    }

    pub fn activate_section(
        &mut self,
        name: &str,
    ) -> Result<PanelTransition, LogicFault> {
        let section = name.parse::<SectionId>()?;
        Ok(self.activate(section))
    }

    // ── opening views ──────────────────────────────────────────────────

    /// Run the command bound to a menu entry.
    pub fn run_action(
        &mut self,
        action: MenuAction,
    ) -> Result<OpenOutcome, WorkspaceError> {
        debug!(?action, "menu action");
        match action.target() {
            ViewKind::Singleton(kind) => self.open_singleton(kind),
            ViewKind::Transient(kind) => {
                let params = if kind.needs_reference_date() {
                    ViewParams::for_date((self.today)())
                } else {
                    ViewParams::default()
                };
                self.open_transient(kind, params).map(OpenOutcome::Opened)
            }
        }
    }

    pub fn open_singleton(
        &mut self,
        kind: SingletonKind,
    ) -> Result<OpenOutcome, WorkspaceError> {
        // A pending close may free the slot we are about to look at.
        self.pump_close_notifications()?;

        let params = kind.params();
        self.registry
            .open_or_focus(
                kind,
                &mut self.host,
                &mut self.counter,
                &mut self.subscriptions,
                |host| host.create(ViewKind::Singleton(kind), &params),
            )
            .inspect_err(|err| warn!(%err, "singleton view not opened"))
            .map_err(WorkspaceError::from)
    }

    /// Open a new instance of a view that may be open any number of times.
    ///
    /// Pie charts opened without a reference date get today's date.
    pub fn open_transient(
        &mut self,
        kind: TransientKind,
        mut params: ViewParams,
    ) -> Result<ViewHandle, WorkspaceError> {
        if kind.needs_reference_date() && params.reference_date.is_none() {
            params.reference_date = Some((self.today)());
        }

        let handle = self
            .host
            .create(ViewKind::Transient(kind), &params)
            .inspect_err(|err| warn!(%err, "transient view not opened"))?;
        self.subscriptions
            .subscribe(handle, CloseSubscriber::DecrementCounter);
        self.host.subscribe_close(handle);
        let open = self.counter.increment();
        info!(%kind, %handle, open, "opened transient view");

        Ok(handle)
    }

    /// Handle the result of the "new entry" choice dialog. A dismissed
    /// dialog opens nothing.
    pub fn open_new_entry(
        &mut self,
        choice: Option<NewEntryChoice>,
    ) -> Result<Option<OpenOutcome>, WorkspaceError> {
        let kind = match choice {
            Some(NewEntryChoice::Expense) => SingletonKind::NewExpense,
            Some(NewEntryChoice::Income) => SingletonKind::NewIncome,
            None => {
                debug!("new entry dialog dismissed");
                return Ok(None);
            }
        };
        self.open_singleton(kind).map(Some)
    }

    // ── closing views ──────────────────────────────────────────────────

    /// Run the close subscribers of `handle` in registration order.
    ///
    /// Returns `Ok(false)` for a handle that was already processed or never
    /// tracked. Every subscriber runs even if the counter rejects its
    /// decrement; the fault is returned afterwards.
    pub fn on_child_closed(
        &mut self,
        handle: ViewHandle,
    ) -> Result<bool, LogicFault> {
        let Some(subscribers) = self.subscriptions.take(handle) else {
            debug!(%handle, "close notification ignored, handle not tracked");
            return Ok(false);
        };

        let mut fault = None;
        for subscriber in subscribers {
            match subscriber {
                CloseSubscriber::DecrementCounter => {
                    if let Err(err) = self.counter.decrement() {
                        fault.get_or_insert(err);
                    }
                }
                CloseSubscriber::ReleaseSlot(kind) => {
                    self.registry.release(kind, handle);
                }
            }
        }
        debug!(%handle, open = self.counter.current(), "child view closed");

        match fault {
            Some(err) => Err(err),
            None => Ok(true),
        }
    }

    /// Process every close the host has queued. Returns how many were new.
    pub fn pump_close_notifications(&mut self) -> Result<usize, LogicFault> {
        let mut processed = 0;
        let mut fault = None;
        for handle in self.host.drain_closed() {
            match self.on_child_closed(handle) {
                Ok(true) => processed += 1,
                Ok(false) => {}
                Err(err) => {
                    processed += 1;
                    fault.get_or_insert(err);
                }
            }
        }
        match fault {
            Some(err) => Err(err),
            None => Ok(processed),
        }
    }

    /// Ask the host to close one open view.
    pub fn close_view(
        &mut self,
        handle: ViewHandle,
    ) -> Result<(), LogicFault> {
        if !self.subscriptions.is_tracked(handle) {
            return Err(LogicFault::UnknownHandle(handle));
        }
        self.host.request_close(handle);
        self.pump_close_notifications().map(|_| ())
    }

    /// Request a close on every open view and process the resulting
    /// notifications through the normal close path.
    pub fn close_all(&mut self) -> Result<usize, LogicFault> {
        let handles = self.subscriptions.handles();
        info!(count = handles.len(), "closing all child views");
        for handle in handles {
            self.host.request_close(handle);
        }
        self.pump_close_notifications()
    }

    pub fn request_exit(&mut self) -> Result<ExitOutcome, LogicFault> {
        match self.confirm_close.confirm_close() {
            CloseDecision::Cancel => {
                info!("exit cancelled");
                Ok(ExitOutcome::Cancelled)
            }
            CloseDecision::Proceed => {
                self.close_all()?;
                info!("shutting down workspace");
                self.host.shutdown();
                Ok(ExitOutcome::Exited)
            }
        }
    }

    // ── other commands ─────────────────────────────────────────────────

    pub fn run_backup(&mut self) -> Result<BackupReport, WorkspaceError> {
        let service = self.backup.as_mut().ok_or(BackupError::Unavailable)?;
        let report = service.run_backup()?;
        info!(
            files = report.files_written,
            location = %report.location.display(),
            "backup finished"
        );
        Ok(report)
    }

    pub fn show_about(&mut self) {
        self.host.show_about();
    }

    /// Flip status bar visibility and return the new state.
    pub fn toggle_status_bar(&mut self) -> bool {
        self.status_bar_visible = !self.status_bar_visible;
        self.status_bar_visible
    }

    pub fn dispatch(
        &mut self,
        event: WorkspaceEvent,
    ) -> Result<(), WorkspaceError> {
        match event {
            WorkspaceEvent::SectionActivated(section) => {
                self.activate(section);
            }
            WorkspaceEvent::MenuAction(action) => {
                self.run_action(action)?;
            }
            WorkspaceEvent::SingletonRequested(kind) => {
                self.open_singleton(kind)?;
            }
            WorkspaceEvent::TransientRequested(kind, params) => {
                self.open_transient(kind, params)?;
            }
            WorkspaceEvent::NewEntryChosen(choice) => {
                self.open_new_entry(choice)?;
            }
            WorkspaceEvent::ChildClosed(handle) => {
                self.on_child_closed(handle)?;
            }
            WorkspaceEvent::CloseAllRequested => {
                self.close_all()?;
            }
            WorkspaceEvent::ExitRequested => {
                self.request_exit()?;
            }
            WorkspaceEvent::AboutRequested => self.show_about(),
            WorkspaceEvent::StatusBarToggled => {
                self.toggle_status_bar();
            }
        }
        Ok(())
    }

    // ── observers ──────────────────────────────────────────────────────

    pub fn current_child_count(&self) -> usize {
        self.counter.current()
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.navigation.active_section()
    }

    pub fn status_line(&self) -> StatusLine {
        StatusLine {
            windows_open: self.counter.current(),
            visible: self.status_bar_visible,
        }
    }

    pub fn navigation(&self) -> &NavigationPanelController {
        &self.navigation
    }

    pub fn registry(&self) -> &SingletonViewRegistry {
        &self.registry
    }

    /// Handles with pending close subscribers, in open order.
    pub fn open_handles(&self) -> Vec<ViewHandle> {
        self.subscriptions.handles()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;
    use crate::error::CreationError;
    use crate::host::testing::{HostCall, RecordingHost};
    use pretty_assertions::assert_eq;

    fn workspace() -> WorkspaceController<RecordingHost> {
        let options = WorkspaceOptions {
            underflow: UnderflowPolicy::Reject,
            start_section: None,
            ..WorkspaceOptions::default()
        };
        WorkspaceController::new(RecordingHost::default(), options)
            .with_clock(|| NaiveDate::from_ymd_opt(2013, 6, 15).unwrap_or_default())
    }

    struct StubBackup;

    impl BackupService for StubBackup {
        fn run_backup(&mut self) -> Result<BackupReport, BackupError> {
            Ok(BackupReport {
                files_written: 3,
                location: PathBuf::from("/tmp/backup"),
            })
        }
    }

    // ── startup ────────────────────────────────────────────────────────

    #[test]
    fn default_options_start_on_main() {
        let ws = WorkspaceController::new(RecordingHost::default(), WorkspaceOptions::default());
        assert_eq!(ws.active_section(), Some(SectionId::Main));
        assert!(ws.navigation().is_panel_visible());
        assert_eq!(ws.host().calls, vec![HostCall::RedrawMenu]);
        assert_eq!(ws.status_line().to_string(), "Windows Open: 0");
    }

    #[test]
    fn section_toggle_scenario() {
        let mut ws = workspace();
        ws.activate_section("Main").unwrap();
        ws.activate_section("Framework").unwrap();
        ws.activate_section("Framework").unwrap();

        assert_eq!(ws.active_section(), None);
        assert_eq!(ws.navigation().panel_height(), 0.0);
        assert!(!ws.navigation().model().section(SectionId::Main).is_visible());
        assert!(!ws.navigation().model().section(SectionId::Framework).is_visible());
    }

    // ── singletons ─────────────────────────────────────────────────────

    #[test]
    fn reopening_a_singleton_focuses_it() {
        let mut ws = workspace();
        let first = ws.open_singleton(SingletonKind::NewIncome).unwrap();
        let second = ws.open_singleton(SingletonKind::NewIncome).unwrap();

        assert_eq!(second, OpenOutcome::Focused(first.handle()));
        assert_eq!(ws.host().created(), 1);
        assert_eq!(ws.current_child_count(), 1);
    }

    #[test]
    fn closed_singleton_opens_a_new_handle() {
        let mut ws = workspace();
        let first = ws.open_singleton(SingletonKind::NewIncome).unwrap().handle();
        ws.host_mut().user_closes(first);
        assert_eq!(ws.pump_close_notifications(), Ok(1));
        assert_eq!(ws.current_child_count(), 0);

        let second = ws.open_singleton(SingletonKind::NewIncome).unwrap();
        assert!(second.is_opened());
        assert_ne!(second.handle(), first);
        assert_eq!(ws.current_child_count(), 1);
    }

    #[test]
    fn pending_close_is_processed_before_a_reopen() {
        let mut ws = workspace();
        let first = ws.open_singleton(SingletonKind::NewExpense).unwrap().handle();
        ws.host_mut().user_closes(first);

        let again = ws.open_singleton(SingletonKind::NewExpense).unwrap();
        assert!(again.is_opened());
        assert_eq!(ws.current_child_count(), 1);
    }

    #[test]
    fn duplicate_close_notifications_are_ignored() {
        let mut ws = workspace();
        let handle = ws.open_singleton(SingletonKind::ExpenseCategory).unwrap().handle();
        ws.open_transient(TransientKind::DetailView, ViewParams::default())
            .unwrap();

        assert_eq!(ws.on_child_closed(handle), Ok(true));
        assert_eq!(ws.on_child_closed(handle), Ok(false));
        assert_eq!(ws.current_child_count(), 1);
        assert!(!ws.registry().is_open(SingletonKind::ExpenseCategory));
    }

    #[test]
    fn creation_failure_is_surfaced_and_retryable() {
        let mut ws = workspace();
        ws.host_mut().fail_next = Some("out of handles".to_string());

        let err = ws.open_singleton(SingletonKind::NewIncome).unwrap_err();
        assert_eq!(
            err,
            WorkspaceError::Creation(CreationError::new(
                SingletonKind::NewIncome,
                "out of handles"
            ))
        );
        assert_eq!(ws.current_child_count(), 0);
        assert!(ws.open_singleton(SingletonKind::NewIncome).unwrap().is_opened());
    }

    // ── transients ─────────────────────────────────────────────────────

    #[test]
    fn transients_always_open_new_instances() {
        let mut ws = workspace();
        let a = ws
            .open_transient(TransientKind::CategoryGraph, ViewParams::default())
            .unwrap();
        let b = ws
            .open_transient(TransientKind::CategoryGraph, ViewParams::default())
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(ws.current_child_count(), 2);
        assert!(ws.registry().open_kinds().is_empty());
    }

    #[test]
    fn pie_chart_action_gets_todays_date() {
        let mut ws = workspace();
        ws.run_action(MenuAction::PieChart).unwrap();

        let today = NaiveDate::from_ymd_opt(2013, 6, 15);
        assert_eq!(
            ws.host().calls.first(),
            Some(&HostCall::Create(
                ViewKind::Transient(TransientKind::CategoryPieChart),
                ViewParams {
                    reference_date: today,
                    category: None
                }
            ))
        );
    }

    #[test]
    fn category_browsers_receive_their_category() {
        let mut ws = workspace();
        ws.run_action(MenuAction::PaymentCategory).unwrap();

        assert_eq!(
            ws.host().calls.first(),
            Some(&HostCall::Create(
                ViewKind::Singleton(SingletonKind::PaymentCategory),
                ViewParams::for_category(crate::view::CategoryType::PaymentMethod)
            ))
        );
    }

    #[test]
    fn new_entry_choice_routes_to_entry_forms() {
        let mut ws = workspace();
        assert_eq!(ws.open_new_entry(None), Ok(None));
        assert_eq!(ws.host().created(), 0);

        ws.open_new_entry(Some(NewEntryChoice::Expense)).unwrap();
        ws.open_new_entry(Some(NewEntryChoice::Income)).unwrap();
        assert!(ws.registry().is_open(SingletonKind::NewExpense));
        assert!(ws.registry().is_open(SingletonKind::NewIncome));
    }

    // ── close all / exit ───────────────────────────────────────────────

    #[test]
    fn close_all_clears_counter_and_slots() {
        let mut ws = workspace();
        for kind in [SingletonKind::NewIncome, SingletonKind::IncomeCategory] {
            ws.open_singleton(kind).unwrap();
        }
        ws.run_action(MenuAction::Graph).unwrap();
        ws.run_action(MenuAction::MethodPieChart).unwrap();

        assert_eq!(ws.close_all(), Ok(4));
        assert_eq!(ws.current_child_count(), 0);
        assert!(ws.registry().open_kinds().is_empty());
        assert!(ws.open_handles().is_empty());
    }

    #[test]
    fn close_unknown_handle_is_a_fault() {
        let mut ws = workspace();
        assert_eq!(
            ws.close_view(ViewHandle::new(42)),
            Err(LogicFault::UnknownHandle(ViewHandle::new(42)))
        );
    }

    #[test]
    fn exit_closes_everything_then_shuts_down() {
        let mut ws = workspace();
        ws.open_singleton(SingletonKind::NewExpense).unwrap();

        assert_eq!(ws.request_exit(), Ok(ExitOutcome::Exited));
        assert_eq!(ws.current_child_count(), 0);
        assert_eq!(ws.host().calls.last(), Some(&HostCall::Shutdown));
    }

    #[test]
    fn cancelled_exit_changes_nothing() {
        let asked = Rc::new(Cell::new(0));
        let counted = Rc::clone(&asked);
        let mut ws = workspace().with_confirm_close_hook(move || {
            counted.set(counted.get() + 1);
            CloseDecision::Cancel
        });
        ws.open_singleton(SingletonKind::NewExpense).unwrap();

        assert_eq!(ws.request_exit(), Ok(ExitOutcome::Cancelled));
        assert_eq!(asked.get(), 1);
        assert_eq!(ws.current_child_count(), 1);
        assert!(!ws.host().calls.contains(&HostCall::Shutdown));
    }

    // ── misc commands ──────────────────────────────────────────────────

    #[test]
    fn backup_without_service_is_unavailable() {
        let mut ws = workspace();
        assert_eq!(
            ws.run_backup(),
            Err(WorkspaceError::Backup(BackupError::Unavailable))
        );

        let mut ws = workspace().with_backup_service(StubBackup);
        assert_eq!(ws.run_backup().map(|r| r.files_written), Ok(3));
    }

    #[test]
    fn dispatch_routes_events() {
        let mut ws = workspace();
        ws.dispatch(WorkspaceEvent::SectionActivated(SectionId::Visualization))
            .unwrap();
        ws.dispatch(WorkspaceEvent::MenuAction(MenuAction::CategoryGraph))
            .unwrap();
        ws.dispatch(WorkspaceEvent::StatusBarToggled).unwrap();
        ws.dispatch(WorkspaceEvent::AboutRequested).unwrap();

        assert_eq!(ws.active_section(), Some(SectionId::Visualization));
        assert_eq!(
            ws.status_line(),
            StatusLine {
                windows_open: 1,
                visible: false
            }
        );
        assert!(ws.host().calls.contains(&HostCall::About));

        ws.dispatch(WorkspaceEvent::CloseAllRequested).unwrap();
        assert_eq!(ws.current_child_count(), 0);
    }

    #[test]
    fn counter_matches_opens_minus_closes() {
        let mut ws = workspace();
        let mut handles = Vec::new();
        for _ in 0..5 {
            handles.push(
                ws.open_transient(TransientKind::DetailView, ViewParams::default())
                    .unwrap(),
            );
        }
        for handle in handles.iter().take(2) {
            ws.close_view(*handle).unwrap();
        }
        assert_eq!(ws.current_child_count(), 3);
    }
}
