use gpui::{IntoElement, ParentElement, Styled, div};
use gpui_component::h_flex;
use ledger_core::{StatusLine, theme::Palette};

use crate::themes::hsla;

pub fn render_status_bar(
    status: &StatusLine,
    palette: &Palette,
) -> impl IntoElement {
    h_flex()
        .w_full()
        .px_3()
        .py_1()
        .border_t_1()
        .border_color(hsla(palette.border))
        .bg(hsla(palette.menu_strip))
        .text_sm()
        .text_color(hsla(palette.muted_text))
        .child(div().child(status.to_string()))
}
