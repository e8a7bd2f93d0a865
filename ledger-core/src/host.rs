//! Collaborators the workspace talks to but does not own.
//!
//! [`WindowHost`] is the window manager that actually builds, focuses and
//! closes child views. [`ConfirmCloseHook`] and [`BackupService`] are the
//! extension points for the persistence layer.

use std::path::PathBuf;

use crate::error::{BackupError, CreationError};
use crate::navigation::NavigationSnapshot;
use crate::view::{ViewHandle, ViewKind, ViewParams};

/// Window manager hosting the child views.
///
/// All calls happen on the UI thread. Close notifications are queued by the
/// host and handed back through [`WindowHost::drain_closed`]; the workspace
/// then routes each one through its close subscribers.
pub trait WindowHost {
    /// Build a new view. Nothing is shown if this fails.
    fn create(
        &mut self,
        kind: ViewKind,
        params: &ViewParams,
    ) -> Result<ViewHandle, CreationError>;

    /// Bring `handle` to the foreground. No-op when it already is.
    fn focus(
        &mut self,
        handle: ViewHandle,
    );

    /// Ask the host to report `handle` through `drain_closed` when it closes.
    fn subscribe_close(
        &mut self,
        handle: ViewHandle,
    );

    /// Close `handle` programmatically. The close is reported like any other.
    fn request_close(
        &mut self,
        handle: ViewHandle,
    );

    /// Close notifications received since the last call, oldest first.
    fn drain_closed(&mut self) -> Vec<ViewHandle>;

    /// Tear down the main window.
    fn shutdown(&mut self);

    /// Menu state changed and the menu bar should be redrawn.
    fn redraw_menu(
        &mut self,
        _snapshot: &NavigationSnapshot,
    ) {}

    fn show_about(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Proceed,
    Cancel,
}

/// Asked before the main window closes, e.g. to confirm unsaved changes.
pub trait ConfirmCloseHook {
    fn confirm_close(&mut self) -> CloseDecision;
}

/// Default hook: never blocks an exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysProceed;

impl ConfirmCloseHook for AlwaysProceed {
    fn confirm_close(&mut self) -> CloseDecision {
        CloseDecision::Proceed
    }
}

impl<F> ConfirmCloseHook for F
where
    F: FnMut() -> CloseDecision,
{
    fn confirm_close(&mut self) -> CloseDecision {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub files_written: usize,
    pub location: PathBuf,
}

pub trait BackupService {
    fn run_backup(&mut self) -> Result<BackupReport, BackupError>;
}

/// Result of the "new entry" choice dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewEntryChoice {
    Expense,
    Income,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording host used by the core's unit tests.

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostCall {
        Create(ViewKind, ViewParams),
        Focus(ViewHandle),
        Subscribe(ViewHandle),
        RequestClose(ViewHandle),
        Shutdown,
        RedrawMenu,
        About,
    }

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub calls: Vec<HostCall>,
        pub fail_next: Option<String>,
        pub closed: Vec<ViewHandle>,
        next: u64,
    }

    impl RecordingHost {
        pub fn created(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, HostCall::Create(..)))
                .count()
        }

        pub fn focused(&self) -> Vec<ViewHandle> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    HostCall::Focus(h) => Some(*h),
                    _ => None,
                })
                .collect()
        }

        /// Simulate the user closing `handle`.
        pub fn user_closes(
            &mut self,
            handle: ViewHandle,
        ) {
            self.closed.push(handle);
        }
    }

    impl WindowHost for RecordingHost {
        fn create(
            &mut self,
            kind: ViewKind,
            params: &ViewParams,
        ) -> Result<ViewHandle, CreationError> {
            self.calls.push(HostCall::Create(kind, *params));
            if let Some(reason) = self.fail_next.take() {
                return Err(CreationError::new(kind, reason));
            }
            self.next += 1;
            Ok(ViewHandle::new(self.next))
        }

        fn focus(
            &mut self,
            handle: ViewHandle,
        ) {
            self.calls.push(HostCall::Focus(handle));
        }

        fn subscribe_close(
            &mut self,
            handle: ViewHandle,
        ) {
            self.calls.push(HostCall::Subscribe(handle));
        }

        fn request_close(
            &mut self,
            handle: ViewHandle,
        ) {
            self.calls.push(HostCall::RequestClose(handle));
            self.closed.push(handle);
        }

        fn drain_closed(&mut self) -> Vec<ViewHandle> {
            std::mem::take(&mut self.closed)
        }

        fn shutdown(&mut self) {
            self.calls.push(HostCall::Shutdown);
        }

        fn redraw_menu(
            &mut self,
            _snapshot: &NavigationSnapshot,
        ) {
            self.calls.push(HostCall::RedrawMenu);
        }

        fn show_about(&mut self) {
            self.calls.push(HostCall::About);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hook_always_proceeds() {
        let mut hook = AlwaysProceed;
        assert_eq!(hook.confirm_close(), CloseDecision::Proceed);
        assert_eq!(hook.confirm_close(), CloseDecision::Proceed);
    }

    #[test]
    fn closures_act_as_hooks() {
        let mut asked = 0;
        let mut hook = || {
            asked += 1;
            CloseDecision::Cancel
        };
        assert_eq!(hook.confirm_close(), CloseDecision::Cancel);
        drop(hook);
        assert_eq!(asked, 1);
    }
}
