//! Static next-step suggestions keyed by value category.

use crate::domain::catalog::ValueCategory;

pub fn suggestion_for(category: ValueCategory) -> &'static str {
    match category {
        ValueCategory::Personal => {
            "Set aside ten minutes each week to check whether your choices reflect who you want to be."
        }
        ValueCategory::Relationship => {
            "Plan one conversation this week with someone close to you about what matters to you both."
        }
        ValueCategory::Professional => {
            "Pick one work goal for the next month that puts your professional values into practice."
        }
        ValueCategory::Lifestyle => {
            "Review your calendar and make room for one habit that supports the life you want."
        }
        ValueCategory::Societal => {
            "Find one local group or cause where you can contribute an hour this month."
        }
    }
}

pub fn closing_suggestion() -> &'static str {
    "Revisit this assessment in a few months to see how your priorities have shifted."
}
