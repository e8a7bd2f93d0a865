//! In-window host for child panels.
//!
//! Child views are panels stacked inside the main window rather than native
//! windows. `PanelHost` keeps their z-order and queues close notifications;
//! the shell view only draws whatever is in here.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ledger_core::{
    CreationError, NavigationSnapshot, ViewHandle, ViewKind, ViewParams, WindowHost,
};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct ChildPanel {
    pub handle: ViewHandle,
    pub kind: ViewKind,
    pub params: ViewParams,
}

impl ChildPanel {
    pub fn title(&self) -> String {
        match (self.params.reference_date, self.params.category) {
            (Some(date), _) => format!("{} - {}", self.kind.title(), month_label(date)),
            (None, Some(category)) => format!("{} ({})", self.kind.title(), category.label()),
            (None, None) => self.kind.title().to_string(),
        }
    }
}

fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[derive(Debug, Default)]
pub struct PanelHost {
    /// Back to front.
    panels: Vec<ChildPanel>,
    next_id: u64,
    max_children: Option<usize>,
    watched: BTreeSet<ViewHandle>,
    closed: Vec<ViewHandle>,
    shutdown_requested: bool,
    about_visible: bool,
    menu: Option<NavigationSnapshot>,
}

impl PanelHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to create more than `limit` panels at once.
    pub fn with_max_children(
        mut self,
        limit: usize,
    ) -> Self {
        self.max_children = Some(limit);
        self
    }

    pub fn panels(&self) -> &[ChildPanel] {
        &self.panels
    }

    pub fn front(&self) -> Option<&ChildPanel> {
        self.panels.last()
    }

    pub fn panel(
        &self,
        handle: ViewHandle,
    ) -> Option<&ChildPanel> {
        self.panels.iter().find(|p| p.handle == handle)
    }

    /// Close a panel as if the user clicked its close button.
    ///
    /// Returns `false` when the panel is already gone. A watched panel gets
    /// exactly one queued notification.
    pub fn user_close(
        &mut self,
        handle: ViewHandle,
    ) -> bool {
        let Some(index) = self.panels.iter().position(|p| p.handle == handle) else {
            return false;
        };
        let panel = self.panels.remove(index);
        debug!(handle = %panel.handle, kind = %panel.kind, "panel closed");
        if self.watched.remove(&handle) {
            self.closed.push(handle);
        }
        true
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    pub fn is_about_visible(&self) -> bool {
        self.about_visible
    }

    pub fn dismiss_about(&mut self) {
        self.about_visible = false;
    }

    /// Menu state from the last redraw request.
    pub fn menu(&self) -> Option<&NavigationSnapshot> {
        self.menu.as_ref()
    }
}

impl WindowHost for PanelHost {
    fn create(
        &mut self,
        kind: ViewKind,
        params: &ViewParams,
    ) -> Result<ViewHandle, CreationError> {
        if let Some(limit) = self.max_children.filter(|limit| self.panels.len() >= *limit) {
            return Err(CreationError::new(
                kind,
                format!("at most {limit} windows can be open"),
            ));
        }

        self.next_id += 1;
        let handle = ViewHandle::new(self.next_id);
        self.panels.push(ChildPanel {
            handle,
            kind,
            params: *params,
        });
        Ok(handle)
    }

    fn focus(
        &mut self,
        handle: ViewHandle,
    ) {
        if let Some(index) = self.panels.iter().position(|p| p.handle == handle) {
            let panel = self.panels.remove(index);
            self.panels.push(panel);
        }
    }

    fn subscribe_close(
        &mut self,
        handle: ViewHandle,
    ) {
        self.watched.insert(handle);
    }

    fn request_close(
        &mut self,
        handle: ViewHandle,
    ) {
        self.user_close(handle);
    }

    fn drain_closed(&mut self) -> Vec<ViewHandle> {
        std::mem::take(&mut self.closed)
    }

    fn shutdown(&mut self) {
        info!(remaining = self.panels.len(), "shutdown requested");
        self.shutdown_requested = true;
    }

    fn redraw_menu(
        &mut self,
        snapshot: &NavigationSnapshot,
    ) {
        self.menu = Some(snapshot.clone());
    }

    fn show_about(&mut self) {
        self.about_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{SingletonKind, TransientKind};
    use pretty_assertions::assert_eq;

    fn create(
        host: &mut PanelHost,
        kind: impl Into<ViewKind>,
    ) -> ViewHandle {
        host.create(kind.into(), &ViewParams::default()).unwrap()
    }

    #[test]
    fn handles_are_unique_and_newest_is_in_front() {
        let mut host = PanelHost::new();
        let a = create(&mut host, SingletonKind::NewIncome);
        let b = create(&mut host, TransientKind::DetailView);

        assert_ne!(a, b);
        assert_eq!(host.front().map(|p| p.handle), Some(b));
    }

    #[test]
    fn focus_raises_a_panel() {
        let mut host = PanelHost::new();
        let a = create(&mut host, SingletonKind::NewIncome);
        create(&mut host, SingletonKind::NewExpense);

        host.focus(a);
        assert_eq!(host.front().map(|p| p.handle), Some(a));
        assert_eq!(host.panels().len(), 2);
    }

    #[test]
    fn close_is_reported_once_for_watched_panels() {
        let mut host = PanelHost::new();
        let watched = create(&mut host, TransientKind::CategoryGraph);
        let unwatched = create(&mut host, TransientKind::CategoryGraph);
        host.subscribe_close(watched);

        assert!(host.user_close(watched));
        assert!(!host.user_close(watched));
        assert!(host.user_close(unwatched));
        assert_eq!(host.drain_closed(), vec![watched]);
        assert_eq!(host.drain_closed(), Vec::<ViewHandle>::new());
    }

    #[test]
    fn limit_refuses_extra_panels() {
        let mut host = PanelHost::new().with_max_children(1);
        create(&mut host, SingletonKind::NewIncome);

        let err = host
            .create(
                SingletonKind::NewExpense.into(),
                &ViewParams::default(),
            )
            .unwrap_err();
        assert_eq!(err.reason, "at most 1 windows can be open");
        assert_eq!(host.panels().len(), 1);
    }

    #[test]
    fn titles_mention_month_or_category() {
        let date = NaiveDate::from_ymd_opt(2013, 3, 9).unwrap();
        let chart = ChildPanel {
            handle: ViewHandle::new(1),
            kind: TransientKind::CategoryPieChart.into(),
            params: ViewParams::for_date(date),
        };
        let browser = ChildPanel {
            handle: ViewHandle::new(2),
            kind: SingletonKind::ExpenseCategory.into(),
            params: SingletonKind::ExpenseCategory.params(),
        };

        assert_eq!(chart.title(), "Category Pie Chart - March 2013");
        assert_eq!(browser.title(), "Expense Categories (Expense)");
    }
}
