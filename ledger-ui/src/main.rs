use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gpui::Application;
use ledger_core::SectionId;
use tracing::{debug, error, info};

use ledger_ui::{config::AppConfig, logging, open_main_window, setup_app};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal finance workspace.
///
/// Opens the main window with the navigation menu. Settings come from
/// `home-ledger.toml` in the working directory unless `--config` points
/// elsewhere; flags override the file.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Settings file to load.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug` or `ledger_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also write the log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Section shown on startup (Main, Framework or Visualization).
    #[arg(long, conflicts_with = "collapsed")]
    section: Option<SectionId>,

    /// Start with the navigation panel collapsed.
    #[arg(long)]
    collapsed: bool,
}

impl Cli {
    fn apply(
        self,
        config: &mut AppConfig,
    ) {
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(path) = self.log_file {
            config.logging.file = Some(path);
        }
        if let Some(section) = self.section {
            config.navigation.start_section = section;
            config.navigation.collapsed = false;
        }
        if self.collapsed {
            config.navigation.collapsed = true;
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::discover(cli.config.as_deref())
        .context("failed to load settings")?;
    cli.apply(&mut config);

    logging::init_logging(&config.logging).context("failed to start logging")?;
    info!(app = logging::app_name(), "starting");
    debug!(?config, "effective settings");

    Application::new().run(move |cx| {
        setup_app(cx);
        if let Err(err) = open_main_window(cx, &config) {
            error!("{err:#}");
            cx.quit();
        }
    });

    Ok(())
}
