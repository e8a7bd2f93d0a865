use anyhow::Context as _;
use gpui::{
    App, AppContext, Bounds, Focusable, KeyBinding, Menu, MenuItem, TitlebarOptions,
    WindowBounds, WindowOptions,
};
use ledger_core::theme::Palette;
use tracing::info;

use crate::{
    Quit, ToggleVerboseLogging,
    app::{APP_TITLE, LedgerShell},
    components::WindowPreferences,
    config::AppConfig,
    quit,
    themes::apply_dark_theme,
    toggle_verbose_logging,
};

pub fn setup_app(cx: &mut App) {
    // Must run before any gpui-component widget is built.
    gpui_component::init(cx);
    apply_dark_theme(&Palette::dark(), cx);

    cx.activate(true);

    #[cfg(target_os = "macos")]
    cx.bind_keys([
        KeyBinding::new("cmd-q", Quit, None),
        KeyBinding::new("cmd-shift-l", ToggleVerboseLogging, None),
    ]);

    #[cfg(not(target_os = "macos"))]
    cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
        KeyBinding::new("ctrl-shift-l", ToggleVerboseLogging, None),
    ]);

    // Only reached when no workspace window handles `Quit` itself.
    cx.on_action(quit);
    cx.on_action(toggle_verbose_logging);

    cx.set_menus(vec![Menu {
        name: "HomeLedger".into(),
        items: vec![
            MenuItem::action("Verbose Logging", ToggleVerboseLogging),
            MenuItem::separator(),
            MenuItem::action("Quit", Quit),
        ],
    }]);
}

/// Opens the workspace window, centred, sized from `config.window`.
pub fn open_main_window(
    cx: &mut App,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let preferences = WindowPreferences::from(config.window);
    let options = config.workspace_options();

    let window_options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None,
            preferences.size,
            cx,
        ))),
        titlebar: Some(TitlebarOptions {
            title: Some(APP_TITLE.into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    cx.open_window(window_options, |window, cx| {
        let shell = cx.new(|cx| LedgerShell::new(options, cx));
        window.focus(&shell.focus_handle(cx));

        // The title-bar close button runs the same exit path as Exit.
        let weak = shell.downgrade();
        window.on_window_should_close(cx, move |_, cx| {
            weak.update(cx, |shell, cx| shell.window_should_close(cx))
                .unwrap_or(true)
        });
        shell
    })
    .context("failed to open the main window")?;

    info!(
        width = config.window.width,
        height = config.window.height,
        "main window opened"
    );
    Ok(())
}
