//! Markdown composition for exported results.

use std::fmt::Write;

use crate::domain::foundation::Timestamp;
use crate::domain::results::ResultsView;

use super::ExportError;

/// Renders ready results as a Markdown document.
pub fn compose_markdown(results: &ResultsView, generated_on: Timestamp) -> Result<String, ExportError> {
    let (ranked, next_steps, category_breakdown) = match results {
        ResultsView::Ready {
            ranked,
            next_steps,
            category_breakdown,
        } => (ranked, next_steps, category_breakdown),
        ResultsView::Empty { .. } => return Err(ExportError::NothingToExport),
    };

    // Writing to a String cannot fail.
    let mut md = String::new();
    let _ = writeln!(md, "# My Values Compass\n");
    let _ = writeln!(md, "_Generated on {}_\n", generated_on.to_date_string());

    let _ = writeln!(md, "## My values, in order\n");
    for item in ranked {
        let _ = writeln!(
            md,
            "{}. **{}** ({})",
            item.rank,
            escape_markdown(item.value.name()),
            item.value.category().display_name()
        );
        if !item.value.description().is_empty() {
            let _ = writeln!(md, "   {}", escape_markdown(item.value.description()));
        }
        if let Some(reflection) = &item.reflection {
            let _ = writeln!(md);
            for line in reflection.lines() {
                let _ = writeln!(md, "   > {}", escape_markdown(line));
            }
        }
        let _ = writeln!(md);
    }

    if !category_breakdown.is_empty() {
        let _ = writeln!(md, "## Where my values sit\n");
        let _ = writeln!(md, "| Area | Values |");
        let _ = writeln!(md, "|------|--------|");
        for entry in category_breakdown {
            let _ = writeln!(md, "| {} | {} |", entry.category.display_name(), entry.count);
        }
        let _ = writeln!(md);
    }

    let _ = writeln!(md, "## Next steps\n");
    for step in next_steps {
        let _ = writeln!(md, "- {}", step);
    }

    Ok(md)
}

/// Backslash-escapes characters that would let free text open markup:
/// inline HTML, headings, emphasis, links, code spans, tables.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~' | '!' | '&'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Download filename without extension.
pub fn export_base_filename(generated_on: Timestamp) -> String {
    format!("values-compass-{}", generated_on.to_date_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ValueCategory, ValuesCatalog};
    use crate::domain::foundation::ValueId;
    use crate::domain::results::{CategoryCount, RankedValue};
    use chrono::{TimeZone, Utc};

    fn fixed_day() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap())
    }

    fn ready() -> ResultsView {
        let catalog = ValuesCatalog::builtin().unwrap();
        let honesty = catalog.get(&ValueId::new("honesty").unwrap()).unwrap().clone();
        ResultsView::Ready {
            ranked: vec![RankedValue {
                rank: 1,
                value: honesty,
                reflection: Some("First line\nSecond line".to_string()),
            }],
            next_steps: vec!["Do one thing.".to_string()],
            category_breakdown: vec![CategoryCount {
                category: ValueCategory::Personal,
                count: 1,
            }],
        }
    }

    #[test]
    fn composes_all_sections() {
        let md = compose_markdown(&ready(), fixed_day()).unwrap();

        assert!(md.starts_with("# My Values Compass"));
        assert!(md.contains("_Generated on 2024-03-09_"));
        assert!(md.contains("1. **Honesty** (Personal)"));
        assert!(md.contains("   > First line\n   > Second line"));
        assert!(md.contains("| Personal | 1 |"));
        assert!(md.contains("- Do one thing."));
    }

    #[test]
    fn reflection_text_cannot_inject_markup() {
        let mut results = ready();
        if let ResultsView::Ready { ranked, .. } = &mut results {
            ranked[0].reflection =
                Some("<script>alert(1)</script>\n# Hijacked heading".to_string());
        }

        let md = compose_markdown(&results, fixed_day()).unwrap();

        assert!(!md.contains("<script>"));
        assert!(md.contains("   > \\<script\\>alert(1)\\</script\\>"));
        assert!(md.contains("   > \\# Hijacked heading"));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        let plain = "Sunday dinners, with everyone.";
        assert_eq!(escape_markdown(plain), plain);
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
    }

    #[test]
    fn empty_results_cannot_be_exported() {
        let empty = ResultsView::Empty {
            reason: "none".to_string(),
        };
        assert_eq!(
            compose_markdown(&empty, fixed_day()),
            Err(ExportError::NothingToExport)
        );
    }

    #[test]
    fn base_filename_is_dated() {
        assert_eq!(export_base_filename(fixed_day()), "values-compass-2024-03-09");
    }
}
