//! Viewport engine (§4.1, C3): the threshold-driven scroll rule, bounding
//! area computation, chunk request emission/eviction, and the selection
//! coordinator pass-through (§4.5, C6) live together here since they all
//! operate on the same `ViewportState` + `ChunkCache` pair inside a single
//! `Update` step (§5: "the engine never observes two updates
//! concurrently").

use crate::animation::{AnimationTicker, TickState};
use crate::state::ViewportState;
use std::collections::HashMap;
use std::time::Instant;
use virtua_cache::ChunkCache;
use virtua_model::{
    Chunk, DataRequest, ErrorValue, MetaMap, RequestContext, RowId, SortDirection, ViewportConfig,
};
use virtua_proto::{Cmd, Intent, Msg, SelectionOp};

/// Translates movement/selection/data/config intents and async replies into
/// state changes, emitting the `Cmd` descriptors a host runtime must
/// execute (§4.1–§4.5).
pub struct ViewportEngine<T> {
    config: ViewportConfig,
    state: ViewportState,
    total: Option<usize>,
    cache: ChunkCache<T>,
    sort_fields: Vec<String>,
    sort_directions: Vec<SortDirection>,
    filters: MetaMap,
    animation: AnimationTicker,
    tick_state: TickState,
    /// Errors recorded against a chunk start by the most recent
    /// `ChunkError` reply, cleared once a successful reload lands. Consumed
    /// by the render pipeline to pick error placeholders over loading ones
    /// (§4.1 failure model, §4.7).
    chunk_errors: HashMap<usize, ErrorValue>,
}

impl<T> ViewportEngine<T> {
    pub fn new(config: ViewportConfig) -> Self {
        let state = ViewportState {
            cursor_index: config.initial_index,
            viewport_start: 0,
        };
        Self {
            config,
            state,
            total: None,
            cache: ChunkCache::new(),
            sort_fields: Vec::new(),
            sort_directions: Vec::new(),
            filters: MetaMap::new(),
            animation: AnimationTicker::default(),
            tick_state: TickState::default(),
            chunk_errors: HashMap::new(),
        }
    }

    pub fn with_animation(mut self, ticker: AnimationTicker) -> Self {
        self.animation = ticker;
        self
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn animation(&self) -> &AnimationTicker {
        &self.animation
    }

    pub fn last_tick(&self) -> Option<Instant> {
        self.tick_state.last_tick
    }

    pub fn cache(&self) -> &ChunkCache<T> {
        &self.cache
    }

    pub fn chunk_error(&self, start: usize) -> Option<&ErrorValue> {
        self.chunk_errors.get(&start)
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext {
            sort_fields: self.sort_fields.clone(),
            sort_directions: self.sort_directions.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Row at `index`, read through whichever loaded chunk covers it
    /// (§3 "the chunk cache exclusively owns Chunk values").
    pub fn row_at(&self, index: usize) -> Option<&virtua_model::Row<T>> {
        let chunk_start = (index / self.config.chunk_size) * self.config.chunk_size;
        self.cache.peek(chunk_start).and_then(|c| c.row_at(index))
    }

    /// `Init() -> Cmd` (§4.3): fetch the total count before anything else.
    pub fn init(&mut self) -> Cmd {
        Cmd::GetTotal(self.request_context())
    }

    pub fn update(&mut self, msg: Msg<T>) -> Cmd {
        match msg {
            Msg::Intent(intent) => self.handle_intent(intent),
            Msg::TotalCountLoaded(n) => self.handle_total_count_loaded(n),
            Msg::ChunkLoaded(chunk) => self.handle_chunk_loaded(chunk),
            Msg::ChunkError { start, error } => self.handle_chunk_error(start, error),
            Msg::SelectionResponse { ok, op, .. } => self.handle_selection_response(ok, op),
            Msg::AnimationTick(now) => self.handle_animation_tick(now),
        }
    }

    fn handle_animation_tick(&mut self, now: Instant) -> Cmd {
        self.tick_state.last_tick = Some(now);
        Cmd::None
    }

    fn handle_total_count_loaded(&mut self, n: usize) -> Cmd {
        self.total = Some(n);
        self.clamp_to_total(n);
        tracing::debug!(target: "viewport.total", total = n, "total count loaded");
        Cmd::batch(self.sync_chunks())
    }

    fn clamp_to_total(&mut self, total: usize) {
        if total == 0 {
            self.state.cursor_index = 0;
            self.state.viewport_start = 0;
            return;
        }
        self.state.cursor_index = self.state.cursor_index.min(total - 1);
        let max_start = total.saturating_sub(self.config.height);
        self.state.viewport_start = self.state.viewport_start.min(max_start);
        if self.state.cursor_index < self.state.viewport_start {
            self.state.viewport_start = self.state.cursor_index;
        }
    }

    fn handle_chunk_loaded(&mut self, chunk: Chunk<T>) -> Cmd {
        let start = chunk.start;
        if let Err(err) = chunk.validate(self.config.chunk_size) {
            tracing::warn!(target: "cache.invariant", start, %err, "rejecting invariant-violating chunk");
            self.cache.clear_pending(start);
            self.chunk_errors.insert(
                start,
                ErrorValue::permanent(format!("invariant violation: {err}")),
            );
            return Cmd::None;
        }
        match self.cache.insert(chunk) {
            virtua_cache::InsertOutcome::Inserted => {
                self.chunk_errors.remove(&start);
            }
            virtua_cache::InsertOutcome::StaleDiscarded => {
                tracing::trace!(target: "cache.insert", start, "stale chunk reply dropped");
            }
        }
        self.run_eviction();
        Cmd::None
    }

    fn handle_chunk_error(&mut self, start: usize, error: ErrorValue) -> Cmd {
        self.cache.clear_pending(start);
        self.chunk_errors.insert(start, error);
        Cmd::None
    }

    fn handle_selection_response(&mut self, ok: bool, op: SelectionOp) -> Cmd {
        if !ok {
            return Cmd::EmitStatus(format!("selection operation {op:?} failed"));
        }
        Cmd::batch(self.refresh_visible_chunks())
    }

    fn handle_intent(&mut self, intent: Intent) -> Cmd {
        match intent {
            Intent::CursorUp => {
                self.single_step(-1);
                Cmd::batch(self.sync_chunks())
            }
            Intent::CursorDown => {
                self.single_step(1);
                Cmd::batch(self.sync_chunks())
            }
            Intent::PageUp => {
                self.page_move(-1);
                Cmd::batch(self.sync_chunks())
            }
            Intent::PageDown => {
                self.page_move(1);
                Cmd::batch(self.sync_chunks())
            }
            Intent::JumpTo(k) => {
                self.jump_to(k);
                Cmd::batch(self.sync_chunks())
            }
            Intent::JumpToStart => {
                self.jump_to(0);
                Cmd::batch(self.sync_chunks())
            }
            Intent::JumpToEnd => {
                let last = self.total.unwrap_or(1).saturating_sub(1);
                self.jump_to(last);
                Cmd::batch(self.sync_chunks())
            }
            Intent::TreeJumpToIndex { .. } => {
                tracing::trace!(
                    target: "viewport.intent",
                    "tree jump intent reached the plain viewport engine unhandled; the tree crate must translate it to JumpTo first"
                );
                Cmd::None
            }

            Intent::SelectCurrent => Cmd::SetSelected {
                index: self.state.cursor_index,
                selected: true,
            },
            Intent::SelectAll => Cmd::SelectAll,
            Intent::ClearSelection => Cmd::ClearSelection,
            Intent::SelectRange { a, b } => self.resolve_select_range(a, b),
            Intent::SetSelectedById { id, selected } => Cmd::SetSelectedById { id, selected },

            Intent::ToggleNode(_) | Intent::ExpandNode(_) | Intent::CollapseNode(_) => {
                tracing::trace!(
                    target: "viewport.intent",
                    "tree structural intent reached the plain viewport engine unhandled"
                );
                Cmd::None
            }

            Intent::DataRefresh => {
                self.cache.invalidate_all();
                self.chunk_errors.clear();
                Cmd::GetTotal(self.request_context())
            }
            Intent::DataChunksRefresh => Cmd::batch(self.refresh_visible_chunks()),
            Intent::FilterSet { field, value } => {
                self.filters.insert(field, value);
                self.invalidate_for_context_change()
            }
            Intent::FilterClear { field } => {
                self.filters.shift_remove(&field);
                self.invalidate_for_context_change()
            }
            Intent::FiltersClearAll => {
                self.filters.clear();
                self.invalidate_for_context_change()
            }
            Intent::SortToggle { field } => {
                self.toggle_sort(&field);
                self.invalidate_for_context_change()
            }
            Intent::SortsClearAll => {
                self.sort_fields.clear();
                self.sort_directions.clear();
                self.invalidate_for_context_change()
            }

            // Table/tree-specific configuration intents are handled by the
            // crates composing this engine (`virtua-table`, `virtua-tree`);
            // the plain engine has no state for them.
            Intent::SetColumnWidth { .. }
            | Intent::SetActiveCellIndication(_)
            | Intent::SetResetScrollOnNavigation(_)
            | Intent::SetHorizontalScrollMode(_)
            | Intent::SetHorizontalScrollScope(_)
            | Intent::HorizontalScrollLeft
            | Intent::HorizontalScrollRight
            | Intent::CycleActiveColumn
            | Intent::SetBorderMask(_)
            | Intent::SetBorderAbsentBehavior { .. } => Cmd::None,
        }
    }

    fn invalidate_for_context_change(&mut self) -> Cmd {
        self.cache.invalidate_all();
        self.chunk_errors.clear();
        Cmd::GetTotal(self.request_context())
    }

    /// `SortToggle(f)` cycle: none -> asc -> desc -> none (§8 invariant 7).
    fn toggle_sort(&mut self, field: &str) {
        if let Some(pos) = self.sort_fields.iter().position(|f| f == field) {
            match self.sort_directions[pos] {
                SortDirection::Asc => self.sort_directions[pos] = SortDirection::Desc,
                SortDirection::Desc => {
                    self.sort_fields.remove(pos);
                    self.sort_directions.remove(pos);
                }
            }
        } else {
            self.sort_fields.push(field.to_string());
            self.sort_directions.push(SortDirection::Asc);
        }
    }

    /// Resolves a `SelectRange` intent's row ids to indices by scanning
    /// currently-loaded chunks, since the data source contract (§4.4) takes
    /// indices, not ids.
    fn resolve_select_range(&self, a: RowId, b: RowId) -> Cmd {
        let mut found_a = None;
        let mut found_b = None;
        for start in self.cache.loaded_starts() {
            if let Some(chunk) = self.cache.peek(start) {
                for (offset, row) in chunk.rows.iter().enumerate() {
                    if row.id == a {
                        found_a = Some(start + offset);
                    }
                    if row.id == b {
                        found_b = Some(start + offset);
                    }
                }
            }
        }
        match (found_a, found_b) {
            (Some(start_idx), Some(end_idx)) => Cmd::SelectRange { start_idx, end_idx },
            _ => Cmd::EmitStatus(
                "SelectRange: one or both row ids are not in a currently loaded chunk".to_string(),
            ),
        }
    }

    /// Threshold-driven scroll rule for a single-step move (§4.1).
    fn single_step(&mut self, d: i64) {
        let Some(total) = self.total else { return };
        if total == 0 {
            return;
        }
        let cursor = self.state.cursor_index as i64;
        let next_cursor = (cursor + d).clamp(0, total as i64 - 1);
        if next_cursor == cursor {
            return;
        }
        let cvi = next_cursor - self.state.viewport_start as i64;
        let max_start = total.saturating_sub(self.config.height) as i64;
        if d < 0 && cvi < self.config.top_threshold as i64 {
            let new_start = (next_cursor - self.config.top_threshold as i64).clamp(0, max_start);
            self.state.viewport_start = new_start as usize;
            tracing::trace!(target: "viewport.scroll", new_start, "scrolled up to top threshold");
        } else if d > 0 && cvi > self.config.bottom_threshold as i64 {
            let new_start =
                (next_cursor - self.config.bottom_threshold as i64).clamp(0, max_start);
            self.state.viewport_start = new_start as usize;
            tracing::trace!(target: "viewport.scroll", new_start, "scrolled down to bottom threshold");
        }
        self.state.cursor_index = next_cursor as usize;
    }

    /// `PageUp`/`PageDown` (§4.1 "Page move").
    fn page_move(&mut self, d: i64) {
        let Some(total) = self.total else { return };
        if total == 0 {
            return;
        }
        let page = self.config.height;
        let max_start = total.saturating_sub(self.config.height);
        if d > 0 {
            self.state.cursor_index = (self.state.cursor_index + page).min(total - 1);
            self.state.viewport_start = (self.state.viewport_start + page).min(max_start);
        } else {
            self.state.cursor_index = self.state.cursor_index.saturating_sub(page);
            self.state.viewport_start = self.state.viewport_start.saturating_sub(page);
        }
    }

    /// `JumpTo(k)` / `JumpToStart` / `JumpToEnd` (§4.1 "Jump"): preserves
    /// `cursorViewportIndex` where feasible, otherwise clamps.
    pub fn jump_to(&mut self, k: usize) {
        let Some(total) = self.total else {
            self.state.cursor_index = 0;
            self.state.viewport_start = 0;
            return;
        };
        if total == 0 {
            self.state.cursor_index = 0;
            self.state.viewport_start = 0;
            return;
        }
        let prev_cvi = self.state.cursor_viewport_index();
        let new_cursor = k.min(total - 1);
        let max_start = total.saturating_sub(self.config.height);
        let desired_start = new_cursor.saturating_sub(prev_cvi);
        self.state.viewport_start = desired_start.min(max_start);
        self.state.cursor_index = new_cursor;
    }

    /// Re-emits chunk requests for the current bounding area and runs
    /// eviction, without changing cursor/viewport position. Exposed for
    /// composing crates (`virtua-table`, `virtua-tree`) that mutate
    /// structural state outside of an `Intent` this engine recognizes
    /// (e.g. a tree node expand/collapse changing what's visible) and
    /// need the same chunk-sync pass `JumpTo`/`CursorDown`/etc. trigger.
    pub fn resync_chunks(&mut self) -> Cmd {
        Cmd::batch(self.sync_chunks())
    }

    /// Bounding area (§4.1 "Bounding-area computation"): `[windowStart,
    /// windowEnd)` around the viewport, expanded by the configured slack.
    fn bounding_area(&self) -> (usize, usize) {
        let total = self.total.unwrap_or(0);
        let window_start = self
            .state
            .viewport_start
            .saturating_sub(self.config.bounding_area_before);
        let window_end = (self.state.viewport_start + self.config.height
            + self.config.bounding_area_after)
            .min(total);
        (window_start, window_end)
    }

    fn required_chunk_starts(&self) -> Vec<usize> {
        let (window_start, window_end) = self.bounding_area();
        if window_end <= window_start || self.config.chunk_size == 0 {
            return Vec::new();
        }
        let first = (window_start / self.config.chunk_size) * self.config.chunk_size;
        let mut starts = Vec::new();
        let mut s = first;
        while s < window_end {
            starts.push(s);
            s += self.config.chunk_size;
        }
        starts
    }

    /// Emits `LoadChunk` for every required start not already loaded or
    /// pending, then evicts (§4.1 "Eviction runs after emission"). Eviction
    /// is silent — it mutates the cache but never produces a `Cmd`.
    fn sync_chunks(&mut self) -> Vec<Cmd> {
        let cmds = self.emit_chunk_requests();
        self.run_eviction();
        cmds
    }

    fn emit_chunk_requests(&mut self) -> Vec<Cmd> {
        let context = self.request_context();
        let mut cmds = Vec::new();
        for start in self.required_chunk_starts() {
            if self.cache.is_loaded(start) || self.cache.is_pending(start) {
                continue;
            }
            let count = self.chunk_count_at(start);
            let request = DataRequest::from_context(start, count, &context);
            self.cache.mark_pending(start, request.clone());
            cmds.push(Cmd::LoadChunk(request));
        }
        cmds
    }

    fn chunk_count_at(&self, start: usize) -> usize {
        let total = self.total.unwrap_or(0);
        self.config.chunk_size.min(total.saturating_sub(start))
    }

    fn run_eviction(&mut self) {
        let (window_start, window_end) = self.bounding_area();
        let slack = self.config.eviction_slack;
        let lo = window_start.saturating_sub(slack);
        let hi = window_end + slack;
        let max_rows = self.config.max_cached_rows;
        self.cache
            .evict(max_rows, |start| start < lo || start >= hi);
    }

    /// `Intent::DataChunksRefresh` / post-selection refresh (§4.3, §4.5):
    /// force-reload every chunk in the current bounding area while
    /// preserving the viewport and the cache epoch.
    fn refresh_visible_chunks(&mut self) -> Vec<Cmd> {
        let starts = self.required_chunk_starts();
        self.cache.invalidate(starts.iter().copied());
        let context = self.request_context();
        let mut cmds = Vec::new();
        for start in starts {
            let count = self.chunk_count_at(start);
            let request = DataRequest::from_context(start, count, &context);
            self.cache.mark_pending(start, request.clone());
            cmds.push(Cmd::LoadChunk(request));
        }
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtua_model::Row;

    fn engine(total: usize) -> ViewportEngine<i32> {
        let config = ViewportConfig::new(10, 2, 7, 20).unwrap();
        let mut e = ViewportEngine::new(config);
        e.update(Msg::TotalCountLoaded(total));
        e
    }

    fn loaded_chunk(start: usize, n: usize, request: DataRequest) -> Chunk<i32> {
        let rows = (0..n)
            .map(|i| Row::new(RowId::from(format!("r{}", start + i)), 0))
            .collect();
        Chunk::new(start, rows, request)
    }

    #[test]
    fn s1_single_step_scroll_at_threshold() {
        // boundingAreaAfter=10 so the post-move window [1, 21) reaches into
        // the next chunk, matching the scenario's "chunk start=20 emitted".
        let config = ViewportConfig::new(10, 2, 7, 20)
            .unwrap()
            .with_bounding_area(0, 10);
        let mut e = ViewportEngine::new(config);
        e.update(Msg::TotalCountLoaded(1000));
        e.state.cursor_index = 7;
        e.state.viewport_start = 0;
        let cmd = e.update(Msg::Intent(Intent::CursorDown));
        assert_eq!(e.state.cursor_index, 8);
        assert_eq!(e.state.viewport_start, 1);
        assert_eq!(e.state.cursor_viewport_index(), 7);
        let mut saw_20 = false;
        if let Cmd::Batch(cmds) = cmd {
            for c in cmds {
                if let Cmd::LoadChunk(req) = c {
                    if req.start == 20 {
                        saw_20 = true;
                    }
                }
            }
        }
        assert!(saw_20, "expected a request for chunk start=20");
    }

    #[test]
    fn s2_jump_beyond_loaded_positions_viewport() {
        let config = ViewportConfig::new(10, 2, 7, 20)
            .unwrap()
            .with_bounding_area(20, 20);
        let mut e: ViewportEngine<i32> = ViewportEngine::new(config);
        e.update(Msg::TotalCountLoaded(1000));
        e.update(Msg::Intent(Intent::JumpTo(500)));
        assert_eq!(e.state.cursor_index, 500);
        assert_eq!(e.state.viewport_start, 500);
        let starts: std::collections::HashSet<usize> = e.cache.pending_starts().collect();
        assert!(starts.contains(&480));
        assert!(starts.contains(&500));
        assert!(starts.contains(&520));
    }

    #[test]
    fn s3_stale_reply_discarded_after_filter_change() {
        let mut e = engine(1000);
        e.update(Msg::Intent(Intent::JumpTo(500)));
        let pending_req = DataRequest::new(500, 20);
        // Simulate: a filter change invalidates everything before the
        // pre-filter reply for start=500 arrives.
        e.update(Msg::Intent(Intent::FilterSet {
            field: "x".into(),
            value: "y".into(),
        }));
        let stale = loaded_chunk(500, 20, pending_req);
        e.update(Msg::ChunkLoaded(stale));
        assert!(!e.cache.is_loaded(500));
    }

    #[test]
    fn s4_selection_round_trip_triggers_refresh() {
        let mut e = engine(100);
        e.state.cursor_index = 3;
        let cmd = e.update(Msg::Intent(Intent::SelectCurrent));
        assert_eq!(
            cmd,
            Cmd::SetSelected {
                index: 3,
                selected: true
            }
        );
        let refresh = e.update(Msg::SelectionResponse {
            ok: true,
            index: Some(3),
            id: None,
            selected: true,
            op: SelectionOp::SetSelected,
        });
        assert!(!refresh.is_none(), "expected refresh commands to be emitted");
    }

    #[test]
    fn selection_failure_surfaces_status_not_refresh() {
        let mut e = engine(100);
        let cmd = e.update(Msg::SelectionResponse {
            ok: false,
            index: Some(3),
            id: None,
            selected: true,
            op: SelectionOp::SetSelected,
        });
        assert!(matches!(cmd, Cmd::EmitStatus(_)));
    }

    #[test]
    fn sort_toggle_cycles_asc_desc_none() {
        let mut e = engine(10);
        e.toggle_sort("name");
        assert_eq!(e.sort_directions, vec![SortDirection::Asc]);
        e.toggle_sort("name");
        assert_eq!(e.sort_directions, vec![SortDirection::Desc]);
        e.toggle_sort("name");
        assert!(e.sort_fields.is_empty());
    }

    #[test]
    fn data_refresh_clears_cache_and_refetches_total() {
        let mut e = engine(100);
        e.update(Msg::Intent(Intent::JumpTo(50)));
        assert!(e.cache.pending_starts().count() > 0 || e.cache.len_loaded() > 0);
        let cmd = e.update(Msg::Intent(Intent::DataRefresh));
        assert_eq!(cmd, Cmd::GetTotal(e.request_context()));
        assert_eq!(e.cache.len_loaded(), 0);
        assert_eq!(e.cache.pending_starts().count(), 0);
    }

    #[test]
    fn invariant_total_bounds_viewport_window() {
        let mut e = engine(5);
        // total < height: viewport_start stays 0, cursor within total.
        assert_eq!(e.state.viewport_start, 0);
        assert!(e.state.cursor_index < 5);
    }
}
