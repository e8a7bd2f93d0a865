//! Top menu bar and the navigation panel beneath it.

use gpui::{
    App, ClickEvent, Context, FontWeight, InteractiveElement, IntoElement, ParentElement,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};
use gpui_component::h_flex;
use ledger_core::{Highlight, SectionId, theme::MenuItemStyle};

use super::make_entry_button;
use crate::{app::LedgerShell, themes::hsla};

/// Commands on the menu bar after the three section toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    New,
    CloseAll,
    ShowStatusBar,
    Backup,
    About,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 6] = [
        MenuCommand::New,
        MenuCommand::CloseAll,
        MenuCommand::ShowStatusBar,
        MenuCommand::Backup,
        MenuCommand::About,
        MenuCommand::Exit,
    ];

    pub fn caption(
        &self,
        status_bar_visible: bool,
    ) -> &'static str {
        match self {
            Self::New => "New...",
            Self::CloseAll => "Close All",
            Self::ShowStatusBar if status_bar_visible => "\u{2713} Show Status Bar",
            Self::ShowStatusBar => "Show Status Bar",
            Self::Backup => "Backup",
            Self::About => "About",
            Self::Exit => "Exit",
        }
    }

    fn id(&self) -> &'static str {
        match self {
            Self::New => "menu-new",
            Self::CloseAll => "menu-close-all",
            Self::ShowStatusBar => "menu-status-bar",
            Self::Backup => "menu-backup",
            Self::About => "menu-about",
            Self::Exit => "menu-exit",
        }
    }

    fn run(
        self,
        shell: &mut LedgerShell,
        cx: &mut Context<LedgerShell>,
    ) {
        match self {
            Self::New => shell.open_choice_dialog(cx),
            Self::CloseAll => shell.close_all(cx),
            Self::ShowStatusBar => shell.toggle_status_bar(cx),
            Self::Backup => shell.backup(cx),
            Self::About => shell.show_about(cx),
            Self::Exit => shell.exit(cx),
        }
    }
}

fn menu_item(
    id: impl Into<SharedString>,
    caption: &'static str,
    style: MenuItemStyle,
    on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> impl IntoElement {
    let hover = hsla(style.hover_background);
    div()
        .id(id.into())
        .px_3()
        .py_1()
        .cursor_pointer()
        .bg(hsla(style.background))
        .text_color(hsla(style.foreground))
        .font_weight(if style.bold {
            FontWeight::BOLD
        } else {
            FontWeight::NORMAL
        })
        .hover(move |s| s.bg(hover))
        .on_click(on_click)
        .child(caption)
}

pub fn render_menu_bar(
    shell: &LedgerShell,
    cx: &mut Context<LedgerShell>,
) -> impl IntoElement {
    let palette = shell.palette();
    let snapshot = shell.workspace().navigation().snapshot();
    let status_visible = shell.workspace().status_line().visible;

    let sections = SectionId::ALL
        .into_iter()
        .map(|section| {
            let style = palette.menu_item_style(snapshot.highlight(section));
            menu_item(
                format!("menu-section-{}", section.name()),
                section.menu_caption(),
                style,
                cx.listener(move |this, _, _, cx| this.toggle_section(section, cx)),
            )
        })
        .collect::<Vec<_>>();

    let normal = palette.menu_item_style(Highlight::Normal);
    let commands = MenuCommand::ALL
        .into_iter()
        .map(|command| {
            menu_item(
                command.id(),
                command.caption(status_visible),
                normal,
                cx.listener(move |this, _, _, cx| command.run(this, cx)),
            )
        })
        .collect::<Vec<_>>();

    h_flex()
        .w_full()
        .bg(hsla(palette.menu_strip))
        .children(sections)
        .children(commands)
}

/// Buttons of the active section, or nothing while collapsed.
pub fn render_navigation_panel(
    shell: &LedgerShell,
    cx: &mut Context<LedgerShell>,
) -> impl IntoElement {
    let navigation = shell.workspace().navigation();
    let padding = navigation.metrics().vertical_padding;

    let buttons = navigation
        .visible_entries()
        .iter()
        .map(|entry| {
            let action = entry.action();
            make_entry_button(
                format!("nav-entry-{}", entry.label()),
                entry,
                shell.measure(),
                cx.listener(move |this, _, _, cx| this.run_action(action, cx)),
            )
        })
        .collect::<Vec<_>>();

    h_flex()
        .w_full()
        .h(px(navigation.panel_height()))
        .when(navigation.is_panel_visible(), |this| {
            this.px(px(padding)).py(px(padding))
        })
        .gap_2()
        .items_start()
        .overflow_hidden()
        .bg(hsla(shell.palette().window))
        .children(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_command_shows_a_check_when_visible() {
        assert_eq!(
            MenuCommand::ShowStatusBar.caption(true),
            "\u{2713} Show Status Bar"
        );
        assert_eq!(MenuCommand::ShowStatusBar.caption(false), "Show Status Bar");
    }

    #[test]
    fn command_ids_are_unique() {
        let mut ids: Vec<_> = MenuCommand::ALL.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MenuCommand::ALL.len());
    }
}
