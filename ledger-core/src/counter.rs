use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::LogicFault;

/// What to do when a close notification arrives with no open child counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderflowPolicy {
    /// Stay at zero and log a warning.
    Clamp,
    /// Leave the count untouched and report [`LogicFault::CounterUnderflow`].
    Reject,
}

impl Default for UnderflowPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Reject
        } else {
            Self::Clamp
        }
    }
}

/// Number of child views currently open, singleton or not.
#[derive(Debug, Clone, Default)]
pub struct ChildWindowCounter {
    open: usize,
    policy: UnderflowPolicy,
}

impl ChildWindowCounter {
    pub fn new(policy: UnderflowPolicy) -> Self {
        Self { open: 0, policy }
    }

    pub fn increment(&mut self) -> usize {
        self.open += 1;
        self.open
    }

    pub fn decrement(&mut self) -> Result<usize, LogicFault> {
        match self.open.checked_sub(1) {
            Some(open) => {
                self.open = open;
                Ok(open)
            }
            None => match self.policy {
                UnderflowPolicy::Clamp => {
                    warn!("child counter decremented at zero, clamping");
                    Ok(0)
                }
                UnderflowPolicy::Reject => {
                    error!("child counter decremented at zero");
                    Err(LogicFault::CounterUnderflow)
                }
            },
        }
    }

    pub fn current(&self) -> usize {
        self.open
    }

    pub fn policy(&self) -> UnderflowPolicy {
        self.policy
    }
}
