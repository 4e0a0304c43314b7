//! ResultsView - the assembled outcome of an assessment.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{ValueCategory, ValueEntry};

/// One ranked value with the user's reflection on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedValue {
    /// 1-based rank, 1 = most important.
    pub rank: usize,
    pub value: ValueEntry,
    pub reflection: Option<String>,
}

/// Number of ranked values falling into one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: ValueCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsView {
    Ready {
        ranked: Vec<RankedValue>,
        next_steps: Vec<String>,
        /// Premium visualization data, in canonical category order.
        category_breakdown: Vec<CategoryCount>,
    },
    Empty {
        reason: String,
    },
}

impl ResultsView {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResultsView::Empty { .. })
    }

    /// Ranked values, empty for `ResultsView::Empty`.
    pub fn ranked(&self) -> &[RankedValue] {
        match self {
            ResultsView::Ready { ranked, .. } => ranked,
            ResultsView::Empty { .. } => &[],
        }
    }

    /// The most important value, if any.
    pub fn top_value(&self) -> Option<&RankedValue> {
        self.ranked().first()
    }
}
