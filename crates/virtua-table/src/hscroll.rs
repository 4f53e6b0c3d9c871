//! Horizontal scroll state (§4.8): advance granularity (`mode`), which
//! rows an offset applies to (`scope`), and active-column cycling.

use unicode_segmentation::UnicodeSegmentation;
use virtua_model::{HScrollMode, HScrollScope};
use virtua_render::width;

/// A single scroll offset (display columns clipped from the left of the
/// active column's content) plus the policy governing how it advances
/// and which rows it's applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HScrollState {
    mode: HScrollMode,
    scope: HScrollScope,
    offset: usize,
    active_column: usize,
    reset_on_navigation: bool,
}

impl Default for HScrollState {
    fn default() -> Self {
        Self {
            mode: HScrollMode::Character,
            scope: HScrollScope::CurrentRowOnly,
            offset: 0,
            active_column: 0,
            reset_on_navigation: true,
        }
    }
}

impl HScrollState {
    pub fn mode(&self) -> HScrollMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: HScrollMode) {
        self.mode = mode;
    }

    pub fn scope(&self) -> HScrollScope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: HScrollScope) {
        self.scope = scope;
    }

    pub fn reset_on_navigation(&self) -> bool {
        self.reset_on_navigation
    }

    pub fn set_reset_on_navigation(&mut self, reset: bool) {
        self.reset_on_navigation = reset;
    }

    pub fn active_column(&self) -> usize {
        self.active_column
    }

    /// Advances to the next column, wrapping around, per `CycleActiveColumn`.
    pub fn cycle_active_column(&mut self, column_count: usize) {
        if column_count == 0 {
            return;
        }
        self.active_column = (self.active_column + 1) % column_count;
        if self.reset_on_navigation {
            self.offset = 0;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The offset to apply to a given row: the shared offset under
    /// `AllRows` scope, zero for every non-cursor row under
    /// `CurrentRowOnly` scope (§4.8: "determines whether scroll offset
    /// applies only to the cursor row or to every visible row").
    pub fn offset_for_row(&self, is_cursor_row: bool) -> usize {
        match self.scope {
            HScrollScope::AllRows => self.offset,
            HScrollScope::CurrentRowOnly => {
                if is_cursor_row {
                    self.offset
                } else {
                    0
                }
            }
        }
    }

    /// `Intent::HorizontalScrollLeft`/`Right` (§4.3, §4.8). `reference_line`
    /// is the active column's cell content for whatever row the advance
    /// should be computed against (typically the cursor row); `word` and
    /// `smart` modes consult it to find the next token boundary.
    pub fn scroll(&mut self, reference_line: &str, direction: ScrollDirection) {
        let max_offset = width::display_width(reference_line);
        let delta = self.step(reference_line, direction);
        self.offset = match direction {
            ScrollDirection::Left => self.offset.saturating_sub(delta),
            ScrollDirection::Right => (self.offset + delta).min(max_offset),
        };
    }

    fn step(&self, reference_line: &str, direction: ScrollDirection) -> usize {
        match self.mode {
            HScrollMode::Character => 1,
            // Pure word mode: hold position once there's no further token
            // boundary to jump to, rather than silently behaving like
            // character mode.
            HScrollMode::Word => word_step(reference_line, self.offset, direction).unwrap_or(0),
            // Smart mode is word mode's boundary-seeking behavior, except
            // it keeps advancing one cell at a time once no further
            // boundary exists (§4.8 "falls back to character near column
            // edges") so it can still reach all the way to the edge.
            HScrollMode::Smart => word_step(reference_line, self.offset, direction).unwrap_or(1),
        }
    }

    /// Resets the shared offset back to zero; called on cursor navigation
    /// when `reset_on_navigation` is set (§4.8).
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Display-column distance from `offset` to the next whitespace-delimited
/// word *start* in `direction`. Returns `None` once there's no further
/// token start to jump to — note this can leave `offset` short of the
/// line's true end when the last token itself isn't a boundary worth
/// stopping at again; `smart` mode's one-cell fallback is what lets
/// scrolling reach all the way to the edge in that case.
fn word_step(line: &str, offset: usize, direction: ScrollDirection) -> Option<usize> {
    let mut boundaries = Vec::new();
    let mut cursor = 0usize;
    for word in line.split_word_bounds() {
        boundaries.push(cursor);
        cursor += width::display_width(word);
    }

    match direction {
        ScrollDirection::Right => boundaries
            .into_iter()
            .find(|&b| b > offset)
            .map(|b| b - offset),
        ScrollDirection::Left => boundaries
            .into_iter()
            .filter(|&b| b < offset)
            .next_back()
            .map(|b| offset - b),
    }
}
