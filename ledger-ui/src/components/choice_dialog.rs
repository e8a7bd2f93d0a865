//! Modal "new entry" chooser. While it is open it covers the whole window,
//! so nothing else can be clicked until a choice is made.

use gpui::{
    App, ClickEvent, Context, InteractiveElement, IntoElement, ParentElement, Styled, Window, div, px,
};
use gpui_component::{h_flex, v_flex};
use ledger_core::{NewEntryChoice, theme::Palette};

use super::make_button;
use crate::{app::LedgerShell, themes::hsla};

pub fn render_choice_dialog(
    palette: &Palette,
    cx: &mut Context<LedgerShell>,
) -> impl IntoElement {
    fn choose(
        choice: Option<NewEntryChoice>,
        cx: &Context<LedgerShell>,
    ) -> impl Fn(&ClickEvent, &mut Window, &mut App) + 'static {
        cx.listener(move |this, _, _, cx| this.choose_new_entry(choice, cx))
    }

    div()
        .id("choice-overlay")
        .absolute()
        .inset_0()
        .flex()
        .items_center()
        .justify_center()
        .occlude()
        .child(
            v_flex()
                .w(px(420.))
                .p_5()
                .gap_4()
                .bg(hsla(palette.window))
                .border_1()
                .border_color(hsla(palette.border))
                .child("What would you like to add?")
                .child(
                    h_flex()
                        .gap_3()
                        .justify_center()
                        .child(make_button(
                            "choice-expense",
                            "Expense",
                            choose(Some(NewEntryChoice::Expense), cx),
                        ))
                        .child(make_button(
                            "choice-income",
                            "Income",
                            choose(Some(NewEntryChoice::Income), cx),
                        ))
                        .child(make_button("choice-cancel", "Cancel", choose(None, cx))),
                ),
        )
}
