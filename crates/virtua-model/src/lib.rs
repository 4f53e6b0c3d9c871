//! Core data model for the virtualization engine: row wrapper, chunk,
//! request, typed metadata, and construction-time viewport configuration.
//!
//! This crate is intentionally inert — it defines shapes and their local
//! invariants (§3 of the design document) but no scrolling, caching, or
//! rendering behavior. Those live in `virtua-viewport`, `virtua-cache`,
//! and `virtua-render` respectively, all of which depend on the types
//! defined here.

pub mod border;
pub mod chunk;
pub mod config;
pub mod ids;
pub mod meta;
pub mod request;
pub mod row;

pub use border::{AbsentBorderBehavior, BorderEdge, BorderMask};
pub use chunk::{Chunk, ChunkValidationError};
pub use config::{ConfigError, HScrollMode, HScrollScope, ViewportConfig};
pub use ids::{NodeId, RowId};
pub use meta::{ErrorValue, MetaMap, MetaValue};
pub use request::{DataRequest, RequestContext, SortDirection};
pub use row::Row;
