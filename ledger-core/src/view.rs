use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LogicFault;

/// Opaque reference to a live child view.
///
/// The host window manager owns the view itself; the core only keeps the
/// handle around to look the view up, focus it, or ask for it to be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Which category table a category browser shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryType {
    Expense,
    Income,
    PaymentMethod,
}

impl CategoryType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::PaymentMethod => "Payment Method",
        }
    }
}

/// Views of which at most one instance may be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingletonKind {
    ExpenseCategory,
    IncomeCategory,
    PaymentCategory,
    NewIncome,
    NewExpense,
    NewRecurringExpense,
    NewRecurringIncome,
}

impl SingletonKind {
    pub const ALL: [SingletonKind; 7] = [
        SingletonKind::ExpenseCategory,
        SingletonKind::IncomeCategory,
        SingletonKind::PaymentCategory,
        SingletonKind::NewIncome,
        SingletonKind::NewExpense,
        SingletonKind::NewRecurringExpense,
        SingletonKind::NewRecurringIncome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpenseCategory => "expense-category",
            Self::IncomeCategory => "income-category",
            Self::PaymentCategory => "payment-category",
            Self::NewIncome => "new-income",
            Self::NewExpense => "new-expense",
            Self::NewRecurringExpense => "new-recurring-expense",
            Self::NewRecurringIncome => "new-recurring-income",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ExpenseCategory => "Expense Categories",
            Self::IncomeCategory => "Income Categories",
            Self::PaymentCategory => "Payment Methods",
            Self::NewIncome => "New Income",
            Self::NewExpense => "New Expense",
            Self::NewRecurringExpense => "New Recurring Expense",
            Self::NewRecurringIncome => "New Recurring Income",
        }
    }

    /// Category table shown by the browser kinds, `None` for entry forms.
    pub fn category_type(&self) -> Option<CategoryType> {
        match self {
            Self::ExpenseCategory => Some(CategoryType::Expense),
            Self::IncomeCategory => Some(CategoryType::Income),
            Self::PaymentCategory => Some(CategoryType::PaymentMethod),
            _ => None,
        }
    }

    /// Construction parameters the host needs to build this kind.
    pub fn params(&self) -> ViewParams {
        match self.category_type() {
            Some(category) => ViewParams::for_category(category),
            None => ViewParams::default(),
        }
    }
}

impl fmt::Display for SingletonKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SingletonKind {
    type Err = LogicFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LogicFault::UnknownKind(s.to_string()))
    }
}

/// Views that may be opened any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransientKind {
    DetailView,
    CategoryGraph,
    MultipleCategoryCompare,
    CategoryPieChart,
    PaymentMethodChart,
}

impl TransientKind {
    pub const ALL: [TransientKind; 5] = [
        TransientKind::DetailView,
        TransientKind::CategoryGraph,
        TransientKind::MultipleCategoryCompare,
        TransientKind::CategoryPieChart,
        TransientKind::PaymentMethodChart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DetailView => "detail-view",
            Self::CategoryGraph => "category-graph",
            Self::MultipleCategoryCompare => "multiple-category-compare",
            Self::CategoryPieChart => "category-pie-chart",
            Self::PaymentMethodChart => "payment-method-chart",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DetailView => "Monthly Details",
            Self::CategoryGraph => "Category Graph",
            Self::MultipleCategoryCompare => "Category Comparison",
            Self::CategoryPieChart => "Category Pie Chart",
            Self::PaymentMethodChart => "Payment Method Chart",
        }
    }

    /// Pie charts are drawn for the month containing a reference date.
    pub fn needs_reference_date(&self) -> bool {
        matches!(self, Self::CategoryPieChart | Self::PaymentMethodChart)
    }
}

impl fmt::Display for TransientKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransientKind {
    type Err = LogicFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LogicFault::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Singleton(SingletonKind),
    Transient(TransientKind),
}

impl ViewKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Singleton(kind) => kind.title(),
            Self::Transient(kind) => kind.title(),
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton(_))
    }
}

impl From<SingletonKind> for ViewKind {
    fn from(kind: SingletonKind) -> Self {
        Self::Singleton(kind)
    }
}

impl From<TransientKind> for ViewKind {
    fn from(kind: TransientKind) -> Self {
        Self::Transient(kind)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Singleton(kind) => kind.fmt(f),
            Self::Transient(kind) => kind.fmt(f),
        }
    }
}

/// Construction parameters handed to the host together with the view kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewParams {
    pub reference_date: Option<NaiveDate>,
    pub category: Option<CategoryType>,
}

impl ViewParams {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            reference_date: Some(date),
            ..Default::default()
        }
    }

    pub fn for_category(category: CategoryType) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }
}
