//! Two-level navigation menu.
//!
//! - `model` - the compiled-in catalog of sections and their entries
//! - `panel` - which section is shown, the panel height and menu highlights

mod model;
mod panel;

pub use model::{
    FixedMeasure, MenuAction, MenuEntry, MenuSection, NavigationMenuModel, SectionId, Size,
    TextMeasure,
};
pub use panel::{
    Highlight, NavigationPanelController, NavigationSnapshot, PanelMetrics, PanelTransition,
};
