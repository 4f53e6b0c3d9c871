//! `Table<T>` (§4.10): a [`TableEngine`] plus the data source it's wired
//! to. Column formatters already carry the whole per-cell render
//! pipeline, so unlike `List`/`Tree` this facade has no separate
//! `RowPipeline` to hold.

use virtua_model::ViewportConfig;
use virtua_proto::{Cmd, Msg};
use virtua_source::DataSource;
use virtua_table::{Column, TableEngine};
use virtua_viewport::AnimationTicker;

use crate::facade::Facade;

pub struct Table<T> {
    engine: TableEngine<T>,
    source: Box<dyn DataSource<T> + Send + Sync>,
}

impl<T> Table<T> {
    pub fn new(
        config: ViewportConfig,
        columns: Vec<Column<T>>,
        source: impl DataSource<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            engine: TableEngine::new(config, columns),
            source: Box::new(source),
        }
    }

    pub fn engine(&self) -> &TableEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TableEngine<T> {
        &mut self.engine
    }
}

impl<T> Facade<T> for Table<T> {
    fn init(&mut self) -> Cmd {
        self.engine.init()
    }

    fn update(&mut self, msg: Msg<T>) -> Cmd {
        self.engine.update(msg)
    }

    fn view(&self) -> String {
        self.engine.render()
    }

    fn data_source(&self) -> &(dyn DataSource<T> + Send + Sync) {
        self.source.as_ref()
    }

    fn animation(&self) -> &AnimationTicker {
        self.engine.viewport().animation()
    }
}
