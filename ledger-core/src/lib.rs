//! Orchestration core for the home ledger desktop shell.
//!
//! The workspace controller owns the navigation menu state, the table of
//! single-instance views and the count of open child views. Everything that
//! actually draws or persists is reached through the traits in [`host`].

pub mod close;
pub mod controller;
pub mod counter;
pub mod error;
pub mod host;
pub mod navigation;
pub mod registry;
pub mod theme;
pub mod view;

pub use controller::{
    ExitOutcome, StatusLine, WorkspaceController, WorkspaceEvent, WorkspaceOptions,
};
pub use counter::{ChildWindowCounter, UnderflowPolicy};
pub use error::{BackupError, CreationError, LogicFault, WorkspaceError};
pub use host::{
    AlwaysProceed, BackupReport, BackupService, CloseDecision, ConfirmCloseHook, NewEntryChoice,
    WindowHost,
};
pub use navigation::{
    Highlight, MenuAction, MenuEntry, MenuSection, NavigationMenuModel, NavigationPanelController,
    NavigationSnapshot, PanelMetrics, PanelTransition, SectionId,
};
pub use registry::{OpenOutcome, SingletonViewRegistry};
pub use view::{CategoryType, SingletonKind, TransientKind, ViewHandle, ViewKind, ViewParams};
