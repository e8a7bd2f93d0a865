use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{FixedMeasure, MenuEntry, NavigationMenuModel, SectionId, TextMeasure};
use crate::error::LogicFault;

/// Sizing constants for the navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelMetrics {
    pub minimum_height: f32,
    pub vertical_padding: f32,
    pub fixed_margin: f32,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            minimum_height: 50.0,
            vertical_padding: 10.0,
            fixed_margin: 10.0,
        }
    }
}

impl PanelMetrics {
    pub fn panel_height(
        &self,
        tallest_entry: f32,
    ) -> f32 {
        let fitted = tallest_entry + self.vertical_padding * 2.0 + self.fixed_margin;
        self.minimum_height.max(fitted)
    }
}

/// Visual state of a top menu-bar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    Active,
    Normal,
}

/// What a call to [`NavigationPanelController::activate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Switched {
        from: Option<SectionId>,
        to: SectionId,
    },
    Reopened(SectionId),
    Collapsed(SectionId),
}

/// Everything the menu bar and panel need to draw themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSnapshot {
    pub active_section: Option<SectionId>,
    pub panel_visible: bool,
    pub panel_height: f32,
    pub highlights: Vec<(SectionId, Highlight)>,
}

impl NavigationSnapshot {
    pub fn highlight(
        &self,
        id: SectionId,
    ) -> Highlight {
        self.highlights
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, highlight)| *highlight)
            .unwrap_or(Highlight::Normal)
    }
}

/// Owns the menu catalog and drives which section's panel is shown.
///
/// At most one section is visible. When `active` is `Some(s)`, `s` is the
/// visible section; when it is `None` every section is hidden and the panel
/// height is 0.
pub struct NavigationPanelController {
    model: NavigationMenuModel,
    metrics: PanelMetrics,
    measure: Box<dyn TextMeasure>,
    active: Option<SectionId>,
    panel_visible: bool,
    panel_height: f32,
    highlights: Vec<(SectionId, Highlight)>,
}

impl NavigationPanelController {
    pub fn new(metrics: PanelMetrics) -> Self {
        let mut controller = Self {
            model: NavigationMenuModel::new(),
            metrics,
            measure: Box::new(FixedMeasure::default()),
            active: None,
            panel_visible: false,
            panel_height: 0.0,
            highlights: Vec::new(),
        };
        controller.refresh_highlights();
        controller
    }

    /// Replace the text measure. The panel height is refitted when a section
    /// is showing.
    pub fn set_measure(
        &mut self,
        measure: Box<dyn TextMeasure>,
    ) {
        self.measure = measure;
        if let Some(id) = self.active.filter(|_| self.panel_visible) {
            self.panel_height = self.fit_height(id);
        }
    }

    pub fn activate(
        &mut self,
        id: SectionId,
    ) -> PanelTransition {
        let transition = if self.active == Some(id) {
            self.toggle(id)
        } else {
            self.switch_to(id)
        };
        self.refresh_highlights();
        debug!(?transition, height = self.panel_height, "navigation transition");
        transition
    }

    /// Activate a section by its catalog name.
    pub fn activate_named(
        &mut self,
        name: &str,
    ) -> Result<PanelTransition, LogicFault> {
        let id = name.parse::<SectionId>()?;
        Ok(self.activate(id))
    }

    fn toggle(
        &mut self,
        id: SectionId,
    ) -> PanelTransition {
        let section = self.model.section_mut(id);
        if section.is_visible() {
            section.set_visible(false);
            self.active = None;
            self.panel_visible = false;
            self.panel_height = 0.0;
            PanelTransition::Collapsed(id)
        } else {
            section.set_visible(true);
            self.panel_height = self.fit_height(id);
            self.panel_visible = true;
            PanelTransition::Reopened(id)
        }
    }

    fn switch_to(
        &mut self,
        id: SectionId,
    ) -> PanelTransition {
        for section in self.model.sections_mut() {
            section.set_visible(false);
        }
        self.model.section_mut(id).set_visible(true);

        let from = self.active.replace(id);
        self.panel_height = self.fit_height(id);
        self.panel_visible = true;
        PanelTransition::Switched { from, to: id }
    }

    fn fit_height(
        &self,
        id: SectionId,
    ) -> f32 {
        let tallest = self.model.section(id).tallest_entry(self.measure.as_ref());
        self.metrics.panel_height(tallest)
    }

    /// Mark the menu-bar item of the active section highlighted and every
    /// other item normal.
    pub fn refresh_highlights(&mut self) {
        self.highlights = SectionId::ALL
            .into_iter()
            .map(|id| {
                let highlight = if self.active == Some(id) {
                    Highlight::Active
                } else {
                    Highlight::Normal
                };
                (id, highlight)
            })
            .collect();
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.active
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn panel_height(&self) -> f32 {
        self.panel_height
    }

    pub fn metrics(&self) -> PanelMetrics {
        self.metrics
    }

    pub fn model(&self) -> &NavigationMenuModel {
        &self.model
    }

    /// Entries of the section currently shown, empty when collapsed.
    pub fn visible_entries(&self) -> &[MenuEntry] {
        match self.active {
            Some(id) if self.panel_visible => self.model.section(id).entries(),
            _ => &[],
        }
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            active_section: self.active,
            panel_visible: self.panel_visible,
            panel_height: self.panel_height,
            highlights: self.highlights.clone(),
        }
    }
}

impl Default for NavigationPanelController {
    fn default() -> Self {
        Self::new(PanelMetrics::default())
    }
}
