//! Main window view.
//!
//! `LedgerShell` owns the workspace controller and turns clicks into
//! workspace calls. All bookkeeping lives in the controller; this view only
//! redraws from it after every action.

use gpui::{
    App, Context, FocusHandle, Focusable, FontWeight, InteractiveElement, IntoElement,
    ParentElement, Render, SharedString, Styled, Subscription, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_component::{h_flex, v_flex};
use ledger_core::{
    MenuAction, NewEntryChoice, SectionId, ViewHandle, WindowHost, WorkspaceController,
    WorkspaceEvent, WorkspaceOptions,
    navigation::FixedMeasure,
    theme::Palette,
};
use tracing::{info, warn};

use crate::{
    Quit,
    components::{
        make_button, render_child_area, render_choice_dialog, render_menu_bar,
        render_navigation_panel, render_status_bar,
    },
    host::PanelHost,
    logging::{log_action_error, log_action_warning},
    themes::hsla,
};

pub const APP_TITLE: &str = "MyHome";

/// Run the exit path: close confirmation, close every child view, shut the
/// host down. Returns `true` when the main window may go away.
pub fn confirm_exit(workspace: &mut WorkspaceController<PanelHost>) -> bool {
    let dispatched = log_action_error("exit", workspace.dispatch(WorkspaceEvent::ExitRequested));
    let allowed = dispatched.is_some() && workspace.host().is_shutdown_requested();
    if !allowed {
        info!(open = workspace.current_child_count(), "main window stays open");
    }
    allowed
}

pub struct LedgerShell {
    workspace: WorkspaceController<PanelHost>,
    palette: Palette,
    measure: FixedMeasure,
    choice_open: bool,
    notice: Option<SharedString>,
    focus_handle: FocusHandle,
    _window_close_subscription: Subscription,
}

impl LedgerShell {
    pub fn new(
        options: WorkspaceOptions,
        cx: &mut Context<Self>,
    ) -> Self {
        // Confirmation already ran in `window_should_close` or `exit`.
        let subscription = cx.on_window_closed(|cx: &mut App| {
            info!("main window closed");
            cx.quit();
        });

        let measure = FixedMeasure::default();
        let workspace =
            WorkspaceController::new(PanelHost::new(), options).with_text_measure(Box::new(measure));

        Self {
            workspace,
            palette: Palette::dark(),
            measure,
            choice_open: false,
            notice: None,
            focus_handle: cx.focus_handle(),
            _window_close_subscription: subscription,
        }
    }

    pub fn workspace(&self) -> &WorkspaceController<PanelHost> {
        &self.workspace
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn measure(&self) -> &FixedMeasure {
        &self.measure
    }

    fn set_notice(
        &mut self,
        notice: impl Into<SharedString>,
    ) {
        self.notice = Some(notice.into());
    }

    // ── menu bar ───────────────────────────────────────────────────────

    /// Hand one inbound event to the workspace and redraw. Failures end up
    /// in the notice strip.
    fn send(
        &mut self,
        event: WorkspaceEvent,
        cx: &mut Context<Self>,
    ) {
        if let Err(err) = self.workspace.dispatch(event) {
            warn!(?event, %err, "workspace event failed");
            self.set_notice(err.to_string());
        }
        cx.notify();
    }

    pub fn toggle_section(
        &mut self,
        section: SectionId,
        cx: &mut Context<Self>,
    ) {
        self.send(WorkspaceEvent::SectionActivated(section), cx);
    }

    pub fn close_all(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.send(WorkspaceEvent::CloseAllRequested, cx);
    }

    pub fn toggle_status_bar(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.send(WorkspaceEvent::StatusBarToggled, cx);
    }

    pub fn backup(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        match self.workspace.run_backup() {
            Ok(report) => self.set_notice(format!(
                "Backup complete: {} files written to {}",
                report.files_written,
                report.location.display()
            )),
            Err(err) => {
                warn!(%err, "backup not run");
                self.set_notice(format!("Backup failed: {err}"));
            }
        }
        cx.notify();
    }

    pub fn show_about(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.send(WorkspaceEvent::AboutRequested, cx);
    }

    pub fn dismiss_about(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.workspace.host_mut().dismiss_about();
        cx.notify();
    }

    /// Exit command, `Quit` key binding and app-menu Quit.
    pub fn exit(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        if confirm_exit(&mut self.workspace) {
            cx.quit();
        }
        cx.notify();
    }

    /// Title-bar close. `false` keeps the window open.
    pub fn window_should_close(
        &mut self,
        cx: &mut Context<Self>,
    ) -> bool {
        let close = confirm_exit(&mut self.workspace);
        cx.notify();
        close
    }

    fn on_quit(
        &mut self,
        _: &Quit,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.exit(cx);
    }

    // ── opening and closing child views ────────────────────────────────

    pub fn run_action(
        &mut self,
        action: MenuAction,
        cx: &mut Context<Self>,
    ) {
        self.notice = None;
        self.send(WorkspaceEvent::MenuAction(action), cx);
    }

    pub fn open_choice_dialog(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.choice_open = true;
        cx.notify();
    }

    pub fn choose_new_entry(
        &mut self,
        choice: Option<NewEntryChoice>,
        cx: &mut Context<Self>,
    ) {
        self.choice_open = false;
        self.send(WorkspaceEvent::NewEntryChosen(choice), cx);
    }

    pub fn focus_panel(
        &mut self,
        handle: ViewHandle,
        cx: &mut Context<Self>,
    ) {
        self.workspace.host_mut().focus(handle);
        cx.notify();
    }

    pub fn close_panel(
        &mut self,
        handle: ViewHandle,
        cx: &mut Context<Self>,
    ) {
        self.workspace.host_mut().user_close(handle);
        log_action_warning("close window", self.workspace.pump_close_notifications());
        cx.notify();
    }

    fn render_notice(
        &self,
        notice: SharedString,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        h_flex()
            .px_3()
            .py_1()
            .gap_3()
            .items_center()
            .bg(hsla(self.palette.button))
            .child(div().flex_1().text_sm().child(notice))
            .child(make_button(
                "notice-dismiss",
                "Dismiss",
                cx.listener(|this, _, _, cx| {
                    this.notice = None;
                    cx.notify();
                }),
            ))
    }

    fn render_about(
        &self,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let palette = &self.palette;
        div()
            .id("about-overlay")
            .absolute()
            .inset_0()
            .flex()
            .items_center()
            .justify_center()
            .occlude()
            .child(
                v_flex()
                    .w(px(360.))
                    .p_5()
                    .gap_3()
                    .items_center()
                    .bg(hsla(palette.window))
                    .border_1()
                    .border_color(hsla(palette.border))
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child(APP_TITLE),
                    )
                    .child(
                        div()
                            .text_color(hsla(palette.muted_text))
                            .child(format!("Home ledger {}", env!("CARGO_PKG_VERSION"))),
                    )
                    .child(make_button(
                        "about-ok",
                        "OK",
                        cx.listener(|this, _, _, cx| this.dismiss_about(cx)),
                    )),
            )
    }
}

impl Focusable for LedgerShell {
    fn focus_handle(
        &self,
        _cx: &App,
    ) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for LedgerShell {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let status = self.workspace.status_line();
        let notice = self.notice.clone();
        let about_visible = self.workspace.host().is_about_visible();

        v_flex()
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_quit))
            .relative()
            .size_full()
            .bg(hsla(self.palette.window))
            .text_color(hsla(self.palette.text))
            .child(render_menu_bar(self, cx))
            .child(render_navigation_panel(self, cx))
            .when_some(notice, |this, notice| {
                this.child(self.render_notice(notice, cx))
            })
            .child(render_child_area(self, cx))
            .when(status.visible, |this| {
                this.child(render_status_bar(&status, &self.palette))
            })
            .when(self.choice_open, |this| {
                this.child(render_choice_dialog(&self.palette, cx))
            })
            .when(about_visible, |this| this.child(self.render_about(cx)))
    }
}
