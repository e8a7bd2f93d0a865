use thiserror::Error;

use crate::view::{ViewHandle, ViewKind};

/// The host could not build the requested view.
///
/// Non-fatal: the caller reports it to the user and nothing in the
/// workspace bookkeeping has changed, so the same request can be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not open {kind}: {reason}")]
pub struct CreationError {
    pub kind: ViewKind,
    pub reason: String,
}

impl CreationError {
    pub fn new(
        kind: impl Into<ViewKind>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Programming errors. None of these occur when the workspace is driven
/// through its own menu catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicFault {
    #[error("open child count would drop below zero")]
    CounterUnderflow,

    #[error("unknown menu section '{0}'")]
    UnknownSection(String),

    #[error("unknown view kind '{0}'")]
    UnknownKind(String),

    #[error("no open view with handle {0}")]
    UnknownHandle(ViewHandle),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackupError {
    #[error("no backup service is configured")]
    Unavailable,

    #[error("backup failed: {0}")]
    Failed(String),
}

/// Any failure surfaced to the action that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Creation(#[from] CreationError),

    #[error(transparent)]
    Logic(#[from] LogicFault),

    #[error(transparent)]
    Backup(#[from] BackupError),
}
