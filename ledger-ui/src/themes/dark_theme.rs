use gpui::{App, Hsla, rgb};
use gpui_component::Theme;
use ledger_core::theme::{Palette, Rgb};
use tracing::debug;

pub fn hsla(color: Rgb) -> Hsla {
    rgb(color.to_hex()).into()
}

fn lighter(
    base: Hsla,
    amount: f32,
) -> Hsla {
    Hsla {
        l: (base.l + amount).clamp(0.0, 1.0),
        ..base
    }
}

/// Push the shell palette into the gpui-component global theme so stock
/// components (buttons, inputs, tables) match the hand-drawn menu bar.
pub fn apply_dark_theme(
    palette: &Palette,
    cx: &mut App,
) {
    let colors = &mut Theme::global_mut(cx).colors;

    let window = hsla(palette.window);
    let button = hsla(palette.button);
    let input = hsla(palette.input);
    let selection = hsla(palette.selection);
    let text = hsla(palette.text);
    let muted_text = hsla(palette.muted_text);
    let border = hsla(palette.border);

    // ── Surfaces ──────────────────────────────────────────────────
    colors.background = window;
    colors.foreground = text;
    colors.popover = window;
    colors.popover_foreground = text;
    colors.title_bar = hsla(palette.menu_strip);
    colors.title_bar_border = border;
    colors.window_border = border;

    // ── Buttons ───────────────────────────────────────────────────
    colors.primary = button;
    colors.primary_foreground = text;
    colors.primary_hover = hsla(palette.hover);
    colors.primary_active = selection;
    colors.secondary = button;
    colors.secondary_foreground = text;
    colors.secondary_hover = hsla(palette.hover);
    colors.secondary_active = selection;

    colors.muted = button;
    colors.muted_foreground = muted_text;
    colors.accent = selection;
    colors.accent_foreground = text;

    // ── Inputs ────────────────────────────────────────────────────
    colors.input = border;
    colors.border = border;
    colors.ring = lighter(selection, 0.15);
    colors.selection = selection;
    colors.caret = text;

    // ── List / table ──────────────────────────────────────────────
    colors.list = input;
    colors.list_hover = hsla(palette.hover);
    colors.list_active = selection;
    colors.list_active_border = selection;
    colors.list_head = button;
    colors.list_even = lighter(input, 0.02);
    colors.table = input;
    colors.table_head = button;
    colors.table_head_foreground = text;
    colors.table_active = selection;

    // ── Tabs ──────────────────────────────────────────────────────
    colors.tab = window;
    colors.tab_foreground = muted_text;
    colors.tab_active = button;
    colors.tab_active_foreground = text;
    colors.tab_bar = window;

    debug!("dark theme applied");
}
