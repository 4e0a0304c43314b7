//! Pure assembly of a `ResultsView` from a session.

use std::collections::HashMap;

use crate::domain::assessment::AssessmentSession;
use crate::domain::catalog::{ValueCategory, ValuesCatalog};

use super::next_steps::{closing_suggestion, suggestion_for};
use super::{CategoryCount, RankedValue, ResultsView};

/// How many top-ranked values drive the next-step suggestions.
pub const NEXT_STEP_SOURCE_COUNT: usize = 3;

const EMPTY_REASON: &str = "You have not ranked any values yet. Go back and choose what matters most to you.";

/// Builds the results for a session. Ids the catalog does not know are skipped.
pub fn assemble(session: &AssessmentSession, catalog: &ValuesCatalog) -> ResultsView {
    let ranked: Vec<RankedValue> = session
        .prioritized_value_ids()
        .iter()
        .filter_map(|id| catalog.get(id))
        .enumerate()
        .map(|(index, entry)| RankedValue {
            rank: index + 1,
            value: entry.clone(),
            reflection: session.reflection(entry.id()).map(str::to_string),
        })
        .collect();

    if ranked.is_empty() {
        return ResultsView::Empty {
            reason: EMPTY_REASON.to_string(),
        };
    }

    let mut next_steps: Vec<String> = Vec::new();
    let mut seen: Vec<ValueCategory> = Vec::new();
    for item in ranked.iter().take(NEXT_STEP_SOURCE_COUNT) {
        let category = item.value.category();
        if !seen.contains(&category) {
            seen.push(category);
            next_steps.push(suggestion_for(category).to_string());
        }
    }
    next_steps.push(closing_suggestion().to_string());

    let mut counts: HashMap<ValueCategory, usize> = HashMap::new();
    for item in &ranked {
        *counts.entry(item.value.category()).or_default() += 1;
    }
    let category_breakdown = ValueCategory::all()
        .iter()
        .filter_map(|category| {
            counts.get(category).map(|count| CategoryCount {
                category: *category,
                count: *count,
            })
        })
        .collect();

    ResultsView::Ready {
        ranked,
        next_steps,
        category_breakdown,
    }
}
