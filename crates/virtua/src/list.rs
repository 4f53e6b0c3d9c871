//! `List<T>` (§4.10): the plain facade — a [`ViewportEngine`] plus a row
//! pipeline and the data source it's wired to.

use virtua_model::ViewportConfig;
use virtua_proto::{Cmd, Msg};
use virtua_render::{RenderContext, RowPipeline};
use virtua_source::DataSource;
use virtua_viewport::{AnimationTicker, ViewportEngine};

use crate::facade::Facade;

pub struct List<T> {
    viewport: ViewportEngine<T>,
    pipeline: RowPipeline<T>,
    source: Box<dyn DataSource<T> + Send + Sync>,
}

impl<T> List<T> {
    pub fn new(
        config: ViewportConfig,
        pipeline: RowPipeline<T>,
        source: impl DataSource<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            viewport: ViewportEngine::new(config),
            pipeline,
            source: Box::new(source),
        }
    }

    pub fn with_animation(mut self, ticker: AnimationTicker) -> Self {
        self.viewport = self.viewport.with_animation(ticker);
        self
    }

    pub fn viewport(&self) -> &ViewportEngine<T> {
        &self.viewport
    }
}

impl<T> Facade<T> for List<T> {
    fn init(&mut self) -> Cmd {
        self.viewport.init()
    }

    fn update(&mut self, msg: Msg<T>) -> Cmd {
        self.viewport.update(msg)
    }

    /// Renders every currently-visible row, one per line (§6 "View()
    /// returns a plain String"). A row whose chunk hasn't arrived yet
    /// falls back to a loading placeholder rather than a blank line, so
    /// the viewport's line count always matches `config.height`.
    fn view(&self) -> String {
        let Some(total) = self.viewport.total() else {
            return String::new();
        };
        let config = self.viewport.config();
        let ctx = RenderContext { config, total: Some(total) };
        let state = self.viewport.state();
        let is_top_threshold = state.is_at_top_threshold(config);
        let is_bottom_threshold = state.is_at_bottom_threshold(config);
        let mut lines = Vec::new();
        for offset in 0..config.height {
            let index = state.viewport_start + offset;
            if index >= total {
                break;
            }
            let is_cursor = index == state.cursor_index;
            let line = match self.viewport.row_at(index) {
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
            lines.push(line);
        }
        lines.join("\n")
    }

    fn data_source(&self) -> &(dyn DataSource<T> + Send + Sync) {
        self.source.as_ref()
    }

    fn animation(&self) -> &AnimationTicker {
        self.viewport.animation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtua_render::ComponentSlot;
    use virtua_source::memory::InMemoryDataSource;
    use virtua_model::RowId;

    fn pipeline() -> RowPipeline<&'static str> {
        RowPipeline::new(vec![
            ComponentSlot::cursor("> ", "  "),
            ComponentSlot::content(Box::new(|row, _i, _ctx, _c, _t, _b| row.item.to_string())),
        ])
    }

    fn source() -> InMemoryDataSource<&'static str> {
        InMemoryDataSource::new(vec!["a", "b", "c"], |item| RowId::from(*item))
    }

    #[tokio::test]
    async fn view_renders_the_loaded_window() {
        let config = ViewportConfig::new(3, 0, 2, 10).unwrap();
        let mut list = List::new(config, pipeline(), source());
        let cmd = list.init();
        let Cmd::GetTotal(ctx) = cmd else { panic!("expected GetTotal") };
        let total = list.data_source().get_total(&ctx).await.unwrap();
        list.update(Msg::TotalCountLoaded(total));
        let chunk = list
            .data_source()
            .load_chunk(virtua_model::DataRequest::new(0, 3))
            .await
            .unwrap();
        list.update(Msg::ChunkLoaded(chunk));
        assert_eq!(list.view(), "> a\n  b\n  c");
    }

    #[test]
    fn view_is_empty_before_total_loads() {
        let config = ViewportConfig::new(3, 0, 2, 10).unwrap();
        let list = List::new(config, pipeline(), source());
        assert_eq!(list.view(), "");
    }
}
