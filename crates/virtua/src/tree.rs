//! `Tree<T>` (§4.10): a [`TreeEngine`] plus a row pipeline and the data
//! source it's wired to. Indentation is computed from the linearizer's
//! depth and prefixed onto whatever the pipeline renders for the row's
//! content — the pipeline itself stays ignorant of tree structure,
//! exactly as it does for `List`/`Table` (§4.7).

use virtua_proto::{Cmd, Msg};
use virtua_render::{RenderContext, RowPipeline};
use virtua_source::DataSource;
use virtua_tree::{TreeEngine, TreeLinearizer};
use virtua_viewport::AnimationTicker;

use crate::facade::Facade;

pub struct Tree<T> {
    engine: TreeEngine<T>,
    pipeline: RowPipeline<T>,
    source: Box<dyn DataSource<T> + Send + Sync>,
    indent: String,
}

impl<T> Tree<T> {
    pub fn new(
        viewport: virtua_viewport::ViewportEngine<T>,
        linearizer: TreeLinearizer<T>,
        pipeline: RowPipeline<T>,
        source: impl DataSource<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            engine: TreeEngine::new(viewport, linearizer),
            pipeline,
            source: Box::new(source),
            indent: "  ".to_string(),
        }
    }

    pub fn with_cascading_selection(mut self, enabled: bool) -> Self {
        self.engine = self.engine.with_cascading_selection(enabled);
        self
    }

    /// The string repeated `depth` times before a row's rendered
    /// content. Defaults to two spaces.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn engine(&self) -> &TreeEngine<T> {
        &self.engine
    }
}

impl<T> Facade<T> for Tree<T> {
    fn init(&mut self) -> Cmd {
        self.engine.init()
    }

    fn update(&mut self, msg: Msg<T>) -> Cmd {
        self.engine.update(msg)
    }

    fn view(&self) -> String {
        let viewport = self.engine.viewport();
        let Some(total) = viewport.total() else {
            return String::new();
        };
        let config = viewport.config();
        let ctx = RenderContext { config, total: Some(total) };
        let state = viewport.state();
        let is_top_threshold = state.is_at_top_threshold(config);
        let is_bottom_threshold = state.is_at_bottom_threshold(config);
        let mut lines = Vec::new();
        for offset in 0..config.height {
            let index = state.viewport_start + offset;
            if index >= total {
                break;
            }
            let is_cursor = index == state.cursor_index;
            let depth = self
                .engine
                .tree()
                .node_at(index)
                .and_then(|id| self.engine.tree().depth_of(id))
                .unwrap_or(0);
            let rendered = match viewport.row_at(index) {
                Some(row) => self.pipeline.render_row(
                    row,
                    index,
                    is_cursor,
                    is_top_threshold,
                    is_bottom_threshold,
                    &ctx,
                ),
                None => "(loading)".to_string(),
            };
            lines.push(format!("{}{}", self.indent.repeat(depth), rendered));
        }
        lines.join("\n")
    }

    fn data_source(&self) -> &(dyn DataSource<T> + Send + Sync) {
        self.source.as_ref()
    }

    fn animation(&self) -> &AnimationTicker {
        self.engine.viewport().animation()
    }
}
