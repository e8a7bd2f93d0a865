pub mod child_panel;
pub mod choice_dialog;
pub mod navigation_bar;
pub mod status_bar;

use gpui::{App, ClickEvent, Pixels, SharedString, Size, Styled, Window, px};
use gpui_component::Sizable;
use gpui_component::button::{Button, ButtonVariants};
use ledger_core::navigation::{MenuEntry, TextMeasure};

use crate::config::WindowConfig;

pub use child_panel::render_child_area;
pub use choice_dialog::render_choice_dialog;
pub use navigation_bar::{render_menu_bar, render_navigation_panel};
pub use status_bar::render_status_bar;

#[derive(Debug, Clone, Copy)]
pub struct WindowPreferences {
    pub size: Size<Pixels>,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        WindowConfig::default().into()
    }
}

impl From<WindowConfig> for WindowPreferences {
    fn from(config: WindowConfig) -> Self {
        Self {
            size: Size {
                width: px(config.width),
                height: px(config.height),
            },
        }
    }
}

/// Creates a primary-styled button with a fixed width.
pub fn make_button(
    id: impl Into<SharedString>,
    label: impl Into<SharedString>,
    on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> Button {
    Button::new(id.into())
        .primary()
        .large()
        .w(px(140.))
        .label(label.into())
        .on_click(on_click)
}

/// Button for a navigation-panel entry, sized to its label.
pub fn make_entry_button(
    id: impl Into<SharedString>,
    entry: &MenuEntry,
    measure: &dyn TextMeasure,
    on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> Button {
    let size = entry.button_size(measure);
    Button::new(id.into())
        .primary()
        .w(px(size.width))
        .h(px(size.height))
        .label(entry.label())
        .on_click(on_click)
}
