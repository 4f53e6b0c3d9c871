//! `ViewportState` (§3): the cursor/window position, plus the derived
//! threshold and dataset-edge flags the render pipeline consults.

use virtua_model::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    pub cursor_index: usize,
    pub viewport_start: usize,
}

impl ViewportState {
    /// `cursorIndex - viewportStart`, always in `[0, height)` once a
    /// non-empty dataset has been laid out (§3 invariant).
    pub fn cursor_viewport_index(&self) -> usize {
        self.cursor_index.saturating_sub(self.viewport_start)
    }

    pub fn is_at_top_threshold(&self, config: &ViewportConfig) -> bool {
        self.cursor_viewport_index() <= config.top_threshold
    }

    pub fn is_at_bottom_threshold(&self, config: &ViewportConfig) -> bool {
        self.cursor_viewport_index() >= config.bottom_threshold
    }

    pub fn at_dataset_start(&self) -> bool {
        self.cursor_index == 0
    }

    pub fn at_dataset_end(&self, total: usize) -> bool {
        total == 0 || self.cursor_index + 1 >= total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_viewport_index_is_the_offset() {
        let state = ViewportState {
            cursor_index: 12,
            viewport_start: 5,
        };
        assert_eq!(state.cursor_viewport_index(), 7);
    }

    #[test]
    fn dataset_end_detection() {
        let state = ViewportState {
            cursor_index: 9,
            viewport_start: 0,
        };
        assert!(state.at_dataset_end(10));
        assert!(!state.at_dataset_end(20));
    }
}
