//! Ordered, enabled sub-component composition (§4.7).
//!
//! Shared by list, table, and tree facades: the pipeline itself is
//! agnostic to the row's item type, differing only in which content
//! formatter is installed (§4.7, "The pipeline is independent of the
//! data-row type").

use virtua_model::Row;

use crate::alignment;
use crate::component::{ComponentKind, ComponentSlot, ErrorFormatter, LoadingFormatter, RenderContext};

fn default_loading_formatter<T>() -> LoadingFormatter<T> {
    Box::new(|_row, _index, _ctx| "(loading)".to_string())
}

fn default_error_formatter<T>() -> ErrorFormatter<T> {
    Box::new(|_row, _index, _ctx, error| format!("! {}", error.message))
}

/// A row renderer built from an ordered list of [`ComponentSlot`]s.
pub struct RowPipeline<T> {
    components: Vec<ComponentSlot<T>>,
    loading_formatter: LoadingFormatter<T>,
    error_formatter: ErrorFormatter<T>,
}

impl<T> RowPipeline<T> {
    /// Builds a pipeline from an explicit slot order. The default order
    /// described in §4.7 is `[cursor, enumerator, content]`; callers
    /// insert `ComponentSlot::spacing(..)` slots wherever pre/post
    /// spacing is wanted.
    pub fn new(components: Vec<ComponentSlot<T>>) -> Self {
        Self {
            components,
            loading_formatter: default_loading_formatter(),
            error_formatter: default_error_formatter(),
        }
    }

    pub fn with_loading_formatter(mut self, f: LoadingFormatter<T>) -> Self {
        self.loading_formatter = f;
        self
    }

    pub fn with_error_formatter(mut self, f: ErrorFormatter<T>) -> Self {
        self.error_formatter = f;
        self
    }

    /// Renders one row. `row.loading` preempts the whole pipeline with a
    /// single placeholder string; `row.error` only substitutes the
    /// content slot, so cursor/enumerator/spacing still render normally
    /// around the error marker (§4.7).
    pub fn render_row(
        &self,
        row: &Row<T>,
        index: usize,
        is_cursor: bool,
        is_top_threshold: bool,
        is_bottom_threshold: bool,
        context: &RenderContext<'_>,
    ) -> String {
        if row.loading {
            return (self.loading_formatter)(row, index, context);
        }

        let mut out = String::new();
        for slot in &self.components {
            if !slot.enabled {
                continue;
            }
            let piece = match &slot.kind {
                ComponentKind::Cursor { indicator, normal } => {
                    if is_cursor {
                        indicator.clone()
                    } else {
                        normal.clone()
                    }
                }
                ComponentKind::Enumerator(f) => f(row, index, context),
                ComponentKind::Content(f) => match &row.error {
                    Some(error) => (self.error_formatter)(row, index, context, error),
                    None => f(row, index, context, is_cursor, is_top_threshold, is_bottom_threshold),
                },
                ComponentKind::Spacing(text) => text.clone(),
            };
            out.push_str(&alignment::constrain(&piece, slot.max_width, slot.alignment));
        }
        out
    }
}
