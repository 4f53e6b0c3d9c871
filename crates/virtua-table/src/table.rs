//! Table renderer (C8, §4.8): wraps [`ViewportEngine`] and intercepts the
//! table-specific `Intent` variants the plain engine only logs and
//! discards (column width, active-cell indication, horizontal scroll,
//! active-column cycling), delegating everything else unchanged.

use virtua_model::ViewportConfig;
use virtua_proto::{Cmd, Intent, Msg};
use virtua_render::RenderContext;
use virtua_viewport::ViewportEngine;

use crate::border::{AbsentBorderBehavior, BorderEdge, BorderMask};
use crate::cell;
use crate::column::Column;
use crate::hscroll::{HScrollState, ScrollDirection};

/// Default active-cell background: an ANSI SGR parameter list (here, the
/// 256-color "blue" background). Stored as the bare parameter string so
/// it slots into `\x1b[{param}m...\x1b[0m` the same way
/// `full_row_cursor_highlight`'s `7` (reverse video) does.
const DEFAULT_ACTIVE_CELL_BACKGROUND: &str = "48;5;24";

pub struct TableEngine<T> {
    viewport: ViewportEngine<T>,
    columns: Vec<Column<T>>,
    active_cell_indication: bool,
    active_cell_background: String,
    full_row_cursor_highlight: bool,
    border_mask: BorderMask,
    top_absent_behavior: AbsentBorderBehavior,
    bottom_absent_behavior: AbsentBorderBehavior,
    hscroll: HScrollState,
}

impl<T> TableEngine<T> {
    pub fn new(config: ViewportConfig, columns: Vec<Column<T>>) -> Self {
        Self {
            viewport: ViewportEngine::new(config),
            columns,
            active_cell_indication: false,
            active_cell_background: DEFAULT_ACTIVE_CELL_BACKGROUND.to_string(),
            full_row_cursor_highlight: false,
            border_mask: BorderMask::default(),
            top_absent_behavior: AbsentBorderBehavior::default(),
            bottom_absent_behavior: AbsentBorderBehavior::default(),
            hscroll: HScrollState::default(),
        }
    }

    pub fn with_border_mask(mut self, mask: BorderMask) -> Self {
        self.border_mask = mask;
        self
    }

    pub fn with_border_absent_behavior(mut self, edge: BorderEdge, behavior: AbsentBorderBehavior) -> Self {
        match edge {
            BorderEdge::Top => self.top_absent_behavior = behavior,
            BorderEdge::Bottom => self.bottom_absent_behavior = behavior,
        }
        self
    }

    pub fn with_full_row_cursor_highlight(mut self, enabled: bool) -> Self {
        self.full_row_cursor_highlight = enabled;
        self
    }

    /// Sets the ANSI SGR parameter(s) the active cell's background uses
    /// (§4.8 "the configured background color"), e.g. `"44"` or
    /// `"48;5;24"`. Applied as an escape wrap, never by padding, so it
    /// never shifts the cell's display width.
    pub fn with_active_cell_background(mut self, sgr_params: impl Into<String>) -> Self {
        self.active_cell_background = sgr_params.into();
        self
    }

    pub fn viewport(&self) -> &ViewportEngine<T> {
        &self.viewport
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn hscroll(&self) -> &HScrollState {
        &self.hscroll
    }

    pub fn active_cell_indication(&self) -> bool {
        self.active_cell_indication
    }

    pub fn active_cell_background(&self) -> &str {
        &self.active_cell_background
    }

    pub fn init(&mut self) -> Cmd {
        self.viewport.init()
    }

    pub fn update(&mut self, msg: Msg<T>) -> Cmd {
        if let Msg::Intent(intent) = &msg {
            match intent {
                Intent::SetColumnWidth { field, width } => {
                    self.set_column_width(field, *width);
                    return Cmd::None;
                }
                Intent::SetActiveCellIndication(on) => {
                    self.active_cell_indication = *on;
                    return Cmd::None;
                }
                Intent::SetResetScrollOnNavigation(on) => {
                    self.hscroll.set_reset_on_navigation(*on);
                    return Cmd::None;
                }
                Intent::SetHorizontalScrollMode(mode) => {
                    self.hscroll.set_mode(*mode);
                    return Cmd::None;
                }
                Intent::SetHorizontalScrollScope(scope) => {
                    self.hscroll.set_scope(*scope);
                    return Cmd::None;
                }
                Intent::HorizontalScrollLeft => {
                    self.scroll_active_column(ScrollDirection::Left);
                    return Cmd::None;
                }
                Intent::HorizontalScrollRight => {
                    self.scroll_active_column(ScrollDirection::Right);
                    return Cmd::None;
                }
                Intent::CycleActiveColumn => {
                    self.hscroll.cycle_active_column(self.columns.len());
                    return Cmd::None;
                }
                Intent::SetBorderMask(mask) => {
                    self.border_mask = *mask;
                    return Cmd::None;
                }
                Intent::SetBorderAbsentBehavior { edge, behavior } => {
                    match edge {
                        BorderEdge::Top => self.top_absent_behavior = *behavior,
                        BorderEdge::Bottom => self.bottom_absent_behavior = *behavior,
                    }
                    return Cmd::None;
                }
                Intent::CursorUp
                | Intent::CursorDown
                | Intent::PageUp
                | Intent::PageDown
                | Intent::JumpTo(_)
                | Intent::JumpToStart
                | Intent::JumpToEnd => {
                    if self.hscroll.reset_on_navigation() {
                        self.hscroll.reset();
                    }
                }
                _ => {}
            }
        }
        self.viewport.update(msg)
    }

    fn set_column_width(&mut self, field: &str, width: u16) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.field == field) {
            column.width = width;
        } else {
            tracing::warn!(target: "table.column", field, "SetColumnWidth for unknown field ignored");
        }
    }

    fn scroll_active_column(&mut self, direction: ScrollDirection) {
        let line = self.active_column_cursor_text();
        self.hscroll.scroll(&line, direction);
    }

    fn active_column_cursor_text(&self) -> String {
        let cursor_index = self.viewport.state().cursor_index;
        let Some(row) = self.viewport.row_at(cursor_index) else {
            return String::new();
        };
        let Some(column) = self.columns.get(self.hscroll.active_column()) else {
            return String::new();
        };
        let Some(formatter) = &column.cell_formatter else {
            return String::new();
        };
        let ctx = RenderContext {
            config: self.viewport.config(),
            total: self.viewport.total(),
        };
        formatter(row, cursor_index, &ctx, true, false, false)
    }

    fn horizontal_rule(&self) -> String {
        let sep_width = if self.border_mask.contains(BorderMask::VERTICALS) {
            3
        } else {
            1
        };
        let total: usize = self
            .columns
            .iter()
            .map(|c| c.width as usize)
            .sum::<usize>()
            + sep_width.saturating_mul(self.columns.len().saturating_sub(1));
        "-".repeat(total)
    }

    fn column_separator(&self) -> &'static str {
        if self.border_mask.contains(BorderMask::VERTICALS) {
            " | "
        } else {
            " "
        }
    }

    fn optional_border_line(
        &self,
        present: bool,
        behavior: AbsentBorderBehavior,
        lines: &mut Vec<String>,
    ) {
        if present {
            lines.push(self.horizontal_rule());
        } else if behavior == AbsentBorderBehavior::BlankLine {
            lines.push(String::new());
        }
    }

    fn render_header_row(&self) -> String {
        let sep = self.column_separator();
        self.columns
            .iter()
            .map(|c| cell::constrain_cell(&c.render_header(), c.header_width(), c.header_alignment))
            .collect::<Vec<_>>()
            .join(sep)
    }

    fn render_body_row(
        &self,
        index: usize,
        is_cursor: bool,
        is_top_threshold: bool,
        is_bottom_threshold: bool,
    ) -> Option<String> {
        let row = self.viewport.row_at(index)?;
        if row.loading {
            return Some("(loading)".to_string());
        }
        let ctx = RenderContext {
            config: self.viewport.config(),
            total: self.viewport.total(),
        };
        let sep = self.column_separator();
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let raw = match &row.error {
                    Some(err) => format!("! {}", err.message),
                    None => match &column.cell_formatter {
                        Some(f) => f(
                            row,
                            index,
                            &ctx,
                            is_cursor,
                            is_top_threshold,
                            is_bottom_threshold,
                        ),
                        None => String::new(),
                    },
                };
                let is_active_cell = is_cursor && i == self.hscroll.active_column();
                // The shared offset only ever scrolls the active column;
                // scope then decides which rows see it applied there.
                let offset = if i == self.hscroll.active_column() {
                    self.hscroll.offset_for_row(is_cursor)
                } else {
                    0
                };
                let scrolled = cell::drop_leading_columns(&raw, offset);
                let constrained = cell::constrain_cell(&scrolled, column.width, column.alignment);
                if self.active_cell_indication && is_active_cell {
                    // An SGR wrap, not literal brackets: `ansi::display_width`
                    // already treats escape runs as zero-width, so this
                    // never shifts the cell's column budget (§4.8 "must not
                    // shift cell width").
                    format!(
                        "\u{1b}[{}m{constrained}\u{1b}[0m",
                        self.active_cell_background
                    )
                } else {
                    constrained
                }
            })
            .collect();
        let line = cells.join(sep);
        if self.full_row_cursor_highlight && is_cursor {
            Some(format!("\u{1b}[7m{line}\u{1b}[0m"))
        } else {
            Some(line)
        }
    }

    /// Renders the whole visible table (§6 "View() returns a plain
    /// String"): borders, header, and the currently-loaded visible rows.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.optional_border_line(
            self.border_mask.contains(BorderMask::TOP),
            self.top_absent_behavior,
            &mut lines,
        );
        lines.push(self.render_header_row());
        // The header separator has no configurable absent-behavior (§6):
        // it always elides cleanly when off.
        self.optional_border_line(
            self.border_mask.contains(BorderMask::HEADER_SEPARATOR),
            AbsentBorderBehavior::RemoveSpace,
            &mut lines,
        );

        let state = self.viewport.state();
        let config = self.viewport.config();
        let is_top_threshold = state.is_at_top_threshold(config);
        let is_bottom_threshold = state.is_at_bottom_threshold(config);
        if let Some(total) = self.viewport.total() {
            for row_offset in 0..config.height {
                let index = state.viewport_start + row_offset;
                if index >= total {
                    break;
                }
                let is_cursor = index == state.cursor_index;
                if let Some(line) =
                    self.render_body_row(index, is_cursor, is_top_threshold, is_bottom_threshold)
                {
                    lines.push(line);
                }
            }
        }

        self.optional_border_line(
            self.border_mask.contains(BorderMask::BOTTOM),
            self.bottom_absent_behavior,
            &mut lines,
        );
        lines.join("\n")
    }
}
