//! Plain-text step renderer.
//!
//! Produces a screen whose body is readable text, suitable for terminals,
//! logs and the JSON API.

use std::fmt::Write;

use crate::domain::assessment::{StepContent, StepView};
use crate::domain::results::ResultsView;
use crate::ports::{RenderError, Screen, StepRenderer};

#[derive(Debug, Default, Clone, Copy)]
pub struct TextStepRenderer;

impl TextStepRenderer {
    fn body(view: &StepView) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "Step {} of {}", view.step_number, view.total_steps)?;

        match &view.content {
            StepContent::Introduction {
                value_count,
                min_selection,
            } => {
                writeln!(
                    out,
                    "Discover what matters most to you. Choose at least {} of {} values, rank them and reflect on why they matter.",
                    min_selection, value_count
                )?;
            }
            StepContent::Selection {
                options,
                selected_count,
                min_selection,
            } => {
                writeln!(out, "{} selected (minimum {})", selected_count, min_selection)?;
                for option in options {
                    let mark = if option.selected { "x" } else { " " };
                    writeln!(
                        out,
                        "[{}] {} - {}",
                        mark,
                        option.value.name(),
                        option.value.description()
                    )?;
                }
            }
            StepContent::Prioritization { ranked } => {
                for option in ranked {
                    writeln!(out, "{}. {}", option.rank, option.value.name())?;
                }
            }
            StepContent::Reflection { items } => {
                for item in items {
                    writeln!(out, "{}. {}", item.rank, item.value.name())?;
                    match &item.text {
                        Some(text) => writeln!(out, "   {}", text)?,
                        None => writeln!(out, "   Why does this value matter to you?")?,
                    }
                }
            }
            StepContent::Results {
                results,
                show_visualizations,
                can_export,
            } => match results {
                ResultsView::Empty { reason } => writeln!(out, "{}", reason)?,
                ResultsView::Ready {
                    ranked,
                    next_steps,
                    category_breakdown,
                } => {
                    for item in ranked {
                        writeln!(out, "{}. {}", item.rank, item.value.name())?;
                    }
                    if *show_visualizations {
                        writeln!(out)?;
                        for entry in category_breakdown {
                            writeln!(
                                out,
                                "{:<14} {}",
                                entry.category.display_name(),
                                "#".repeat(entry.count)
                            )?;
                        }
                    }
                    writeln!(out)?;
                    for step in next_steps {
                        writeln!(out, "- {}", step)?;
                    }
                    if *can_export {
                        writeln!(out, "\nExport available: markdown, html, pdf")?;
                    }
                }
            },
        }

        if let Some(deficiency) = &view.deficiency {
            writeln!(out, "\n{}", deficiency)?;
        }
        Ok(out)
    }
}

impl StepRenderer for TextStepRenderer {
    fn render(&self, view: &StepView) -> Result<Screen, RenderError> {
        let body = Self::body(view).map_err(|e| RenderError::new(view.step, e.to_string()))?;
        Ok(Screen {
            step: Some(view.step),
            title: view.title.clone(),
            body,
            is_error: false,
        })
    }
}
