pub mod app;
pub mod components;
pub mod config;
pub mod gui;
pub mod host;
pub mod logging;
pub mod themes;

use gpui::{App, actions};
pub use gui::{open_main_window, setup_app};
use tracing::info;

actions!(home_ledger, [Quit, ToggleVerboseLogging]);

/// Fallback for `Quit` when no workspace window handled it. The main window
/// runs its own exit path first; see `LedgerShell::exit`.
pub fn quit(
    _: &Quit,
    cx: &mut App,
) {
    info!("quit requested with no workspace window in focus");
    cx.quit();
}

pub fn toggle_verbose_logging(
    _: &ToggleVerboseLogging,
    _cx: &mut App,
) {
    if let Some(verbose) =
        logging::log_action_error("toggle verbose logging", logging::toggle_verbose())
    {
        info!(verbose, "log level switched");
    }
}
