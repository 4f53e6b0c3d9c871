//! The data source contract (§4.4, C5) and a reference in-memory adapter
//! (§4.4 ADDED) that implements it in full for tests and documentation
//! examples.
//!
//! The engine never calls a `DataSource` directly — it only ever returns
//! `virtua_proto::Cmd` descriptors. A host runtime (the reference one
//! lives in the `virtua` facade crate) owns the concrete `DataSource` and
//! is responsible for matching each `Cmd` to a trait method call and
//! turning the result into a `virtua_proto::Msg` fed back into `Update`.

pub mod error;
pub mod memory;

pub use error::DataSourceError;

use async_trait::async_trait;
use virtua_model::{Chunk, RequestContext, RowId};

/// Implemented by the host. All methods except [`DataSource::get_item_id`]
/// are asynchronous fetch/mutation operations; `get_item_id` is the only
/// synchronous hook and must be a pure function of `item` (§4.4).
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Current total row count under the given sort/filter context.
    async fn get_total(&self, context: &RequestContext) -> Result<usize, DataSourceError>;

    /// Load a contiguous window. Must return at most `request.count` rows,
    /// contiguous from `request.start`, and the returned `Chunk::request`
    /// must equal `request` verbatim so the cache can validate the reply
    /// (§4.1, §4.2).
    async fn load_chunk(
        &self,
        request: virtua_model::DataRequest,
    ) -> Result<Chunk<T>, DataSourceError>;

    async fn set_selected(&self, index: usize, selected: bool) -> Result<bool, DataSourceError>;

    async fn set_selected_by_id(
        &self,
        id: RowId,
        selected: bool,
    ) -> Result<bool, DataSourceError>;

    async fn select_all(&self) -> Result<bool, DataSourceError>;

    async fn clear_selection(&self) -> Result<bool, DataSourceError>;

    async fn select_range(
        &self,
        start_idx: usize,
        end_idx: usize,
    ) -> Result<bool, DataSourceError>;

    /// Pure, synchronous, and must be stable: the same logical row always
    /// yields the same id, and ids are unique across the dataset at any
    /// instant (§4.4 constraints).
    fn get_item_id(&self, item: &T) -> RowId;
}
