//! Public facade (C11, §4.10): `List<T>`, `Table<T>`, and `Tree<T>`
//! compose the lower engine crates (viewport, render, table, tree) with
//! a caller-supplied [`virtua_source::DataSource`] behind the single
//! `init`/`update`/`view` shape every consumer actually needs, plus a
//! reference host runtime and a minimal default keymap for callers who
//! don't want to write their own event loop or key-binding layer.
//!
//! Re-exports the lower crates' public types so a caller depending only
//! on `virtua` has everything: configuration (`virtua_model`), the
//! command/message protocol (`virtua_proto`), the data source contract
//! and its in-memory reference adapter (`virtua_source`), the row render
//! pipeline (`virtua_render`), and the table/tree-specific types
//! (`virtua_table`, `virtua_tree`).

pub mod defaults;
pub mod facade;
pub mod list;
pub mod runtime;
pub mod table;
pub mod tree;

pub use facade::Facade;
pub use list::List;
pub use runtime::Runtime;
pub use table::Table;
pub use tree::Tree;

pub use virtua_model::{
    Chunk, ConfigError, ErrorValue, HScrollMode, HScrollScope, MetaMap, MetaValue, NodeId, Row,
    RowId, ViewportConfig,
};
pub use virtua_proto::{Cmd, Intent, Msg, SelectionOp};
pub use virtua_render::{
    Alignment, ComponentKind, ComponentSlot, ContentFormatter, RenderContext, RowPipeline,
};
pub use virtua_source::{memory::InMemoryDataSource, DataSource, DataSourceError};
pub use virtua_table::{
    AbsentBorderBehavior, BorderEdge, BorderMask, Column, HScrollState, ScrollDirection,
};
pub use virtua_tree::{TreeError, TreeLinearizer, TreeNodeSpec};
