use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogicFault;
use crate::view::{SingletonKind, TransientKind, ViewKind};

/// Space added around a label to size its menu button, per axis.
const BUTTON_INSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionId {
    Main,
    Framework,
    Visualization,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [
        SectionId::Main,
        SectionId::Framework,
        SectionId::Visualization,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Framework => "Framework",
            Self::Visualization => "Visualization",
        }
    }

    /// Caption of the top menu-bar item that toggles this section.
    pub fn menu_caption(&self) -> &'static str {
        match self {
            Self::Main => "Main Menu",
            Self::Framework => "Framework",
            Self::Visualization => "Visualization",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionId {
    type Err = LogicFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LogicFault::UnknownSection(s.to_string()))
    }
}

/// Command bound to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    ViewDetails,
    SingleIncome,
    SingleExpense,
    RecurringIncome,
    RecurringExpense,
    Graph,
    PieChart,
    PaymentMethodChart,
    ExpenseCategory,
    IncomeCategory,
    PaymentCategory,
    CategoryGraph,
    MultipleCategoryGraph,
    CategoryPieChart,
    MethodPieChart,
}

impl MenuAction {
    /// The view this action opens.
    pub fn target(&self) -> ViewKind {
        match self {
            Self::ViewDetails => TransientKind::DetailView.into(),
            Self::SingleIncome => SingletonKind::NewIncome.into(),
            Self::SingleExpense => SingletonKind::NewExpense.into(),
            Self::RecurringIncome => SingletonKind::NewRecurringIncome.into(),
            Self::RecurringExpense => SingletonKind::NewRecurringExpense.into(),
            Self::Graph | Self::CategoryGraph => TransientKind::CategoryGraph.into(),
            Self::PieChart | Self::CategoryPieChart => TransientKind::CategoryPieChart.into(),
            Self::PaymentMethodChart | Self::MethodPieChart => {
                TransientKind::PaymentMethodChart.into()
            }
            Self::ExpenseCategory => SingletonKind::ExpenseCategory.into(),
            Self::IncomeCategory => SingletonKind::IncomeCategory.into(),
            Self::PaymentCategory => SingletonKind::PaymentCategory.into(),
            Self::MultipleCategoryGraph => TransientKind::MultipleCategoryCompare.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Measures rendered label text so menu buttons can be sized.
pub trait TextMeasure {
    fn measure(
        &self,
        text: &str,
    ) -> Size;
}

/// Single-line measure with a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.5,
            line_height: 18.0,
        }
    }
}

impl TextMeasure for FixedMeasure {
    fn measure(
        &self,
        text: &str,
    ) -> Size {
        Size {
            width: text.chars().count() as f32 * self.char_width,
            height: self.line_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    label: &'static str,
    action: MenuAction,
}

impl MenuEntry {
    const fn new(
        label: &'static str,
        action: MenuAction,
    ) -> Self {
        Self { label, action }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn action(&self) -> MenuAction {
        self.action
    }

    /// Size of the button that renders this entry.
    pub fn button_size(
        &self,
        measure: &dyn TextMeasure,
    ) -> Size {
        let text = measure.measure(self.label);
        Size {
            width: text.width + BUTTON_INSET,
            height: text.height + BUTTON_INSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    id: SectionId,
    entries: Vec<MenuEntry>,
    visible: bool,
}

impl MenuSection {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(
        &mut self,
        visible: bool,
    ) {
        self.visible = visible;
    }

    /// Height of the tallest entry button, 0 for an empty section.
    pub fn tallest_entry(
        &self,
        measure: &dyn TextMeasure,
    ) -> f32 {
        self.entries
            .iter()
            .map(|entry| entry.button_size(measure).height)
            .fold(0.0, f32::max)
    }
}

/// Static catalog of menu sections. Only section visibility changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationMenuModel {
    sections: Vec<MenuSection>,
}

impl NavigationMenuModel {
    pub fn new() -> Self {
        use MenuAction::*;

        let sections = vec![
            MenuSection {
                id: SectionId::Main,
                entries: vec![
                    MenuEntry::new("View Details", ViewDetails),
                    MenuEntry::new("Single Income", SingleIncome),
                    MenuEntry::new("Single Expense", SingleExpense),
                    MenuEntry::new("Recurring Income", RecurringIncome),
                    MenuEntry::new("Recurring Expense", RecurringExpense),
                    MenuEntry::new("Graph", Graph),
                    MenuEntry::new("Pie Chart", PieChart),
                    MenuEntry::new("Payment Method Chart", PaymentMethodChart),
                ],
                visible: false,
            },
            MenuSection {
                id: SectionId::Framework,
                entries: vec![
                    MenuEntry::new("Expense Category", ExpenseCategory),
                    MenuEntry::new("Income Category", IncomeCategory),
                    MenuEntry::new("Payment Category", PaymentCategory),
                ],
                visible: false,
            },
            MenuSection {
                id: SectionId::Visualization,
                entries: vec![
                    MenuEntry::new("Category Graph", CategoryGraph),
                    MenuEntry::new("Multiple Category Graph", MultipleCategoryGraph),
                    MenuEntry::new("Category Pie Chart", CategoryPieChart),
                    MenuEntry::new("Method Pie Chart", MethodPieChart),
                ],
                visible: false,
            },
        ];

        Self { sections }
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    pub fn section(
        &self,
        id: SectionId,
    ) -> &MenuSection {
        // The catalog holds every SectionId, in declaration order.
        &self.sections[id as usize]
    }

    pub(crate) fn section_mut(
        &mut self,
        id: SectionId,
    ) -> &mut MenuSection {
        &mut self.sections[id as usize]
    }

    pub(crate) fn sections_mut(&mut self) -> impl Iterator<Item = &mut MenuSection> {
        self.sections.iter_mut()
    }

    pub fn visible_sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections
            .iter()
            .filter(|section| section.visible)
            .map(|section| section.id)
    }
}

impl Default for NavigationMenuModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_has_three_sections_with_fixed_entry_counts() {
        let model = NavigationMenuModel::new();
        let counts: Vec<_> = model
            .sections()
            .iter()
            .map(|s| (s.id(), s.entries().len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                (SectionId::Main, 8),
                (SectionId::Framework, 3),
                (SectionId::Visualization, 4)
            ]
        );
    }

    #[test]
    fn section_lookup_matches_id() {
        let model = NavigationMenuModel::new();
        for id in SectionId::ALL {
            assert_eq!(model.section(id).id(), id);
        }
    }

    #[test]
    fn every_section_starts_hidden() {
        let model = NavigationMenuModel::new();
        assert_eq!(model.visible_sections().count(), 0);
    }

    #[test]
    fn section_names_parse_case_insensitively() {
        assert_eq!("framework".parse::<SectionId>(), Ok(SectionId::Framework));
        assert_eq!(" Main ".parse::<SectionId>(), Ok(SectionId::Main));
        assert_eq!(
            "Reports".parse::<SectionId>(),
            Err(LogicFault::UnknownSection("Reports".to_string()))
        );
    }

    #[test]
    fn framework_entries_open_category_browsers() {
        let model = NavigationMenuModel::new();
        let targets: Vec<_> = model
            .section(SectionId::Framework)
            .entries()
            .iter()
            .map(|e| e.action().target())
            .collect();
        assert_eq!(
            targets,
            vec![
                ViewKind::Singleton(SingletonKind::ExpenseCategory),
                ViewKind::Singleton(SingletonKind::IncomeCategory),
                ViewKind::Singleton(SingletonKind::PaymentCategory),
            ]
        );
    }

    #[test]
    fn button_size_pads_measured_text() {
        let measure = FixedMeasure {
            char_width: 10.0,
            line_height: 16.0,
        };
        let entry = MenuEntry::new("Graph", MenuAction::Graph);
        assert_eq!(
            entry.button_size(&measure),
            Size {
                width: 70.0,
                height: 36.0
            }
        );
    }
}
