//! Row render pipeline (C7, §4.7).
//!
//! Renders one visible row at a time by composing an ordered, enabled
//! list of sub-components into a single `String`. Shared verbatim by
//! the list, table, and tree facades — only the content formatter
//! differs between them (§4.7, §4.10). This crate knows nothing about
//! scrolling or caching; it only consumes the `Row<T>` values and
//! threshold flags the viewport engine already computed.

pub mod alignment;
pub mod component;
pub mod enumerators;
pub mod pipeline;
pub mod width;

pub use alignment::Alignment;
pub use component::{
    ComponentKind, ComponentSlot, ContentFormatter, EnumeratorFn, ErrorFormatter, LoadingFormatter,
    RenderContext,
};
pub use pipeline::RowPipeline;
